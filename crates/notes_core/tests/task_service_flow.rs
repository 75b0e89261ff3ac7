use notes_core::db::open_db_in_memory;
use notes_core::{
    EntityKind, FieldEditor, InputEvent, NewTask, Priority, ServiceError, TaskPatch, TaskStatus,
    ValidationError, Workspace,
};

#[test]
fn bad_status_in_patch_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let task = ws.tasks.create_task(NewTask::titled("Pay rent")).unwrap();

    let patch = TaskPatch {
        title: Some("Pay rent twice".into()),
        status: Some("finished".into()),
        ..TaskPatch::default()
    };
    let err = ws.tasks.update_task(&task.id, &patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidTaskStatus(_))
    ));
    assert_eq!(ws.tasks.require_task(&task.id).unwrap(), task);
}

#[test]
fn patch_clears_optional_fields_with_inner_none() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let task = ws
        .tasks
        .create_task(NewTask {
            description: Some("ring first".into()),
            due_at: Some(1_800_000_000_000),
            ..NewTask::titled("Call plumber")
        })
        .unwrap();

    let patch = TaskPatch {
        description: Some(None),
        due_at: Some(None),
        priority: Some(" urgent ".into()),
        tags: Some(vec!["home".into(), " home ".into(), "".into()]),
        ..TaskPatch::default()
    };
    let updated = ws.tasks.update_task(&task.id, &patch).unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(updated.due_at, None);
    assert_eq!(updated.priority, Priority::Urgent);
    assert_eq!(updated.tags, vec!["home".to_string()]);
}

#[test]
fn complete_restamps_but_status_change_keeps_first_stamp() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let task = ws.tasks.create_task(NewTask::titled("Ship it")).unwrap();

    let first = ws.tasks.set_status(&task.id, "completed").unwrap();
    let stamp = first.completed_at.unwrap();

    let again = ws.tasks.set_status(&task.id, "completed").unwrap();
    assert_eq!(again.completed_at, Some(stamp));

    std::thread::sleep(std::time::Duration::from_millis(5));
    let restamped = ws.tasks.complete_task(&task.id).unwrap();
    assert!(restamped.completed_at.unwrap() > stamp);
    assert_eq!(restamped.status, TaskStatus::Completed);
}

#[test]
fn save_edits_persists_editor_values() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let task = ws.tasks.create_task(NewTask::titled("Old")).unwrap();

    let mut editor = FieldEditor::new(&task);
    let mut events = vec![InputEvent::Confirm; 1];
    events.extend([InputEvent::Backspace; 3]);
    events.extend(InputEvent::typed("New"));
    events.extend([InputEvent::Confirm, InputEvent::Save]);
    editor.handle_all(events);

    let saved = ws.tasks.save_edits(&task, &editor).unwrap();
    assert_eq!(saved.title, "New");
    assert_eq!(ws.tasks.require_task(&task.id).unwrap(), saved);
}

#[test]
fn deleting_missing_task_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let err = ws.tasks.delete_task("nope").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::Task,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Task 'nope' not found.");
}

#[test]
fn archiving_routes_by_kind() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let task = ws.tasks.create_task(NewTask::titled("Old chore")).unwrap();
    let note = ws
        .notes
        .create_note(notes_core::NewNote {
            title: "Keep".into(),
            content: "body".into(),
            ..Default::default()
        })
        .unwrap();

    let archived = ws
        .archive_entity(&notes_core::EntityRef::Task(task))
        .unwrap();
    match archived {
        notes_core::EntityRef::Task(task) => assert_eq!(task.status, TaskStatus::Cancelled),
        other => panic!("unexpected {other:?}"),
    }

    let err = ws
        .archive_entity(&notes_core::EntityRef::Note(note))
        .unwrap_err();
    assert_eq!(err.to_string(), "notes cannot be archived");
}
