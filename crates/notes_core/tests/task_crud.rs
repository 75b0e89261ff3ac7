use notes_core::db::open_db_in_memory;
use notes_core::{
    Priority, RepoError, SqliteTaskRepository, Task, TaskFilter, TaskRepository, TaskStatus,
    ValidationError,
};

fn task_at(title: &str, created_at: i64) -> Task {
    let mut task = Task::new(title);
    task.created_at = created_at;
    task.updated_at = created_at;
    task
}

#[test]
fn create_get_update_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::new("Write report");
    task.description = Some("quarterly".into());
    task.priority = Priority::High;
    task.due_at = Some(1_800_000_000_000);
    task.tags = vec!["work".into(), "q3".into()];
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(&id).unwrap().unwrap();
    assert_eq!(loaded, task);

    task.title = "Write final report".into();
    task.set_status(TaskStatus::Completed, task.updated_at + 10);
    repo.update_task(&task).unwrap();
    let loaded = repo.get_task(&id).unwrap().unwrap();
    assert_eq!(loaded.title, "Write final report");
    assert_eq!(loaded.status, TaskStatus::Completed);
    assert_eq!(loaded.completed_at, Some(task.updated_at));

    assert!(repo.delete_task(&id).unwrap());
    assert!(!repo.delete_task(&id).unwrap());
    assert!(repo.get_task(&id).unwrap().is_none());
}

#[test]
fn blank_title_is_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.create_task(&Task::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankTitle)
    ));
}

#[test]
fn update_missing_row_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("ghost");
    let err = repo.update_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
}

#[test]
fn list_orders_newest_first_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut old = task_at("old", 100);
    old.package_id = Some("pkg".into());
    let mut new = task_at("new", 300);
    new.priority = Priority::Urgent;
    let mut middle = task_at("middle", 200);
    middle.set_status(TaskStatus::InProgress, 200);
    middle.package_id = Some("pkg".into());
    for task in [&old, &new, &middle] {
        repo.create_task(task).unwrap();
    }

    let titles = |filter: &TaskFilter| -> Vec<String> {
        repo.list_tasks(filter)
            .unwrap()
            .into_iter()
            .map(|task| task.title)
            .collect()
    };

    assert_eq!(titles(&TaskFilter::default()), vec!["new", "middle", "old"]);
    assert_eq!(titles(&TaskFilter::in_package("pkg")), vec!["middle", "old"]);
    assert_eq!(
        titles(&TaskFilter {
            status: Some(TaskStatus::InProgress),
            ..TaskFilter::default()
        }),
        vec!["middle"]
    );
    assert_eq!(
        titles(&TaskFilter {
            priority: Some(Priority::Urgent),
            ..TaskFilter::default()
        }),
        vec!["new"]
    );
}

#[test]
fn corrupt_status_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    // Bypass the CHECK constraint to simulate a hand-edited database.
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO tasks (id, title, status, priority, created_at, updated_at)
         VALUES ('bad', 'x', 'done', 'medium', 1, 1);",
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let err = repo.get_task("bad").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
