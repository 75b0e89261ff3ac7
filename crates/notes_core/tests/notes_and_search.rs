use notes_core::db::open_db_in_memory;
use notes_core::{
    search_all, NewNote, NewPackage, NewTask, Note, NoteFilter, NoteRepository, NotePatch,
    SqliteNoteRepository, Workspace,
};

#[test]
fn note_roundtrip_keeps_lists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let mut note = Note::new("Standup", "- yesterday\n- today");
    note.tags = vec!["daily".into()];
    note.add_linked_task("task-1", note.updated_at);
    repo.create_note(&note).unwrap();

    assert_eq!(repo.get_note(&note.id).unwrap(), Some(note.clone()));
}

#[test]
fn notes_list_by_most_recent_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let mut first = Note::new("first", "");
    first.updated_at = 10;
    let mut second = Note::new("second", "");
    second.updated_at = 20;
    second.package_id = Some("pkg".into());
    repo.create_note(&first).unwrap();
    repo.create_note(&second).unwrap();

    let all: Vec<_> = repo
        .list_notes(&NoteFilter::default())
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(all, vec!["second", "first"]);
    assert_eq!(repo.list_notes(&NoteFilter::in_package("pkg")).unwrap().len(), 1);
}

#[test]
fn linking_through_the_service_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    let note = ws
        .notes
        .create_note(NewNote {
            title: "Plan".into(),
            ..NewNote::default()
        })
        .unwrap();

    let (_, changed) = ws.notes.link_task(&note.id, "t-1").unwrap();
    assert!(changed);
    let (linked, changed) = ws.notes.link_task(&note.id, "t-1").unwrap();
    assert!(!changed);
    assert_eq!(linked.linked_tasks, vec!["t-1".to_string()]);

    let patched = ws
        .notes
        .update_note(
            &note.id,
            &NotePatch {
                content: Some("# Plan\nbody".into()),
                ..NotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(patched.linked_tasks, vec!["t-1".to_string()]);
    assert_eq!(patched.content, "# Plan\nbody");
}

#[test]
fn search_matches_each_kind_on_its_text_fields() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);

    ws.tasks
        .create_task(NewTask {
            description: Some("rotate the API keys".into()),
            ..NewTask::titled("Security chores")
        })
        .unwrap();
    ws.tasks.create_task(NewTask::titled("Buy milk")).unwrap();
    ws.notes
        .create_note(NewNote {
            title: "Meeting".into(),
            content: "discussed api limits".into(),
            ..NewNote::default()
        })
        .unwrap();
    ws.packages
        .create_package(NewPackage {
            name: "API v2".into(),
            ..NewPackage::default()
        })
        .unwrap();

    let results = search_all(&conn, "api").unwrap();
    assert_eq!(results.tasks.len(), 1);
    assert_eq!(results.tasks[0].title, "Security chores");
    assert_eq!(results.notes.len(), 1);
    assert_eq!(results.packages.len(), 1);
    assert_eq!(results.total(), 3);
}

#[test]
fn search_treats_wildcards_literally_and_ignores_blank_queries() {
    let conn = open_db_in_memory().unwrap();
    let ws = Workspace::new(&conn);
    ws.tasks.create_task(NewTask::titled("50% off sale")).unwrap();
    ws.tasks.create_task(NewTask::titled("500 offers")).unwrap();

    let results = ws.search("50%").unwrap();
    assert_eq!(results.tasks.len(), 1);
    assert_eq!(results.tasks[0].title, "50% off sale");

    assert!(ws.search("_").unwrap().is_empty());
    assert!(ws.search("   ").unwrap().is_empty());
}
