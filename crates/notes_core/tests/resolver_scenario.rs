use notes_core::db::open_db_in_memory;
use notes_core::resolve::{ANY_KIND, ARCHIVABLE_KINDS};
use notes_core::{
    resolve, EntityKind, EntityRef, NewNote, NewTask, Resolution, ServiceError,
    SqliteTaskRepository, Task, TaskRepository, Workspace,
};

fn task_with_id(id: &str, title: &str) -> Task {
    let mut task = Task::new(title);
    task.id = id.to_string();
    task
}

fn pool() -> Vec<Task> {
    vec![
        task_with_id("aaa11122-0000-0000-0000-000000000000", "Fix bug"),
        task_with_id("bbb22233-0000-0000-0000-000000000000", "Fix typo"),
        task_with_id("ccc33344-0000-0000-0000-000000000000", "Update docs"),
    ]
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title.as_str()).collect()
}

#[test]
fn title_fragment_is_ambiguous_in_input_order() {
    let Resolution::Ambiguous(found) = resolve("Fix", pool()) else {
        panic!("expected ambiguity");
    };
    assert_eq!(titles(&found), vec!["Fix bug", "Fix typo"]);
}

#[test]
fn id_prefix_is_unique() {
    let Resolution::Unique(found) = resolve("aaa111", pool()) else {
        panic!("expected a unique match");
    };
    assert_eq!(found.title, "Fix bug");
}

#[test]
fn eight_char_short_id_always_matches_its_record() {
    for task in pool() {
        let short = notes_core::short_id(&task.id).to_string();
        assert_eq!(resolve(&short, pool()), Resolution::Unique(task));
    }
}

#[test]
fn no_match_is_not_found() {
    assert_eq!(resolve("deploy", pool()), Resolution::NotFound);
}

#[test]
fn id_match_precedes_title_match() {
    // "b" prefixes the "Fix typo" id and appears in the "Fix bug" title.
    let Resolution::Ambiguous(found) = resolve("b", pool()) else {
        panic!("expected ambiguity");
    };
    assert_eq!(titles(&found), vec!["Fix typo", "Fix bug"]);
}

#[test]
fn record_matching_both_ways_is_listed_once() {
    // "c" prefixes the "Update docs" id and also appears in its title.
    assert!(matches!(
        resolve("c", pool()),
        Resolution::Unique(task) if task.title == "Update docs"
    ));
}

#[test]
fn service_find_surfaces_candidates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    for task in pool() {
        repo.create_task(&task).unwrap();
    }
    let ws = Workspace::new(&conn);

    match ws.tasks.find_task("fix").unwrap_err() {
        ServiceError::Ambiguous {
            kind, candidates, ..
        } => {
            assert_eq!(kind, EntityKind::Task);
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = ws.tasks.find_task("nothing").unwrap_err();
    assert_eq!(err.to_string(), "Task 'nothing' not found.");

    let exact = ws
        .tasks
        .find_task("ccc33344-0000-0000-0000-000000000000")
        .unwrap();
    assert_eq!(exact.title, "Update docs");
}

#[test]
fn cross_kind_dispatch_prefers_tasks_then_notes() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    ws.tasks.create_task(NewTask::titled("Quarterly review")).unwrap();
    ws.notes
        .create_note(NewNote {
            title: "Reading list".into(),
            ..NewNote::default()
        })
        .unwrap();

    let found = ws.find_entity("review", ANY_KIND).unwrap();
    assert_eq!(found.kind(), EntityKind::Task);

    let found = ws.find_entity("reading", ANY_KIND).unwrap();
    assert!(matches!(found, EntityRef::Note(_)));

    let err = ws.find_entity("reading", ARCHIVABLE_KINDS).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}
