use super::{Shell, ShellSettings};
use crate::format::Palette;
use crate::prompt::ScriptedPrompter;
use notes_core::{
    open_db_in_memory, NewNote, NewPackage, NewTask, NoteFilter, PackageFilter, Priority,
    TaskFilter, TaskStatus, Workspace,
};
use rusqlite::Connection;

fn shell<'conn>(conn: &'conn Connection, lines: &[&str]) -> Shell<'conn, ScriptedPrompter, Vec<u8>> {
    Shell::new(
        Workspace::new(conn),
        ShellSettings {
            db_path: ":memory:".into(),
            server_port: 0,
            completed_window: chrono::Duration::days(7),
        },
        Palette::plain(),
        ScriptedPrompter::new(lines),
        Vec::new(),
    )
}

fn run_script(conn: &Connection, lines: &[&str]) -> String {
    let mut shell = shell(conn, lines);
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn session_ends_on_quit_or_end_of_input() {
    let conn = open_db_in_memory().unwrap();
    let output = run_script(&conn, &["help", "quit", "status"]);
    assert!(output.contains("Available Commands:"));
    assert_eq!(output.matches("Current Status:").count(), 1);
    assert!(output.trim_end().ends_with("Goodbye!"));

    let output = run_script(&conn, &[]);
    assert!(output.ends_with("\nGoodbye!\n"));
}

#[test]
fn unknown_command_and_missing_argument() {
    let conn = open_db_in_memory().unwrap();
    let output = run_script(&conn, &["frobnicate", "complete", "q"]);
    assert!(output.contains("Unknown command: frobnicate\nType 'help' for available commands."));
    assert!(output.contains("Usage: complete <id_or_title>"));
}

#[test]
fn create_task_prompts_and_scopes_to_current_package() {
    let conn = open_db_in_memory().unwrap();
    let output = run_script(
        &conn,
        &[
            "create-package Work",
            "day job",
            "y",
            r#"create-task "Write report""#,
            "quarterly",
            "HIGH",
            "not a date",
            "docs, q3",
            "quit",
        ],
    );
    assert!(output.contains("Package 'Work' created successfully!"));
    assert!(output.contains("Switched to package: Work"));
    assert!(output.contains("Invalid date format, skipping due date."));
    assert!(output.contains("Task 'Write report' created successfully! (ID: "));

    let workspace = Workspace::new(&conn);
    let work = workspace.packages.require_by_name("work").unwrap();
    let task = workspace.tasks.find_task("report").unwrap();
    assert_eq!(task.package_id.as_deref(), Some(work.id.as_str()));
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.description.as_deref(), Some("quarterly"));
    assert_eq!(task.due_at, None);
    assert_eq!(task.tags, vec!["docs".to_string(), "q3".to_string()]);
}

#[test]
fn prompt_follows_the_session_context() {
    let conn = open_db_in_memory().unwrap();
    Workspace::new(&conn)
        .packages
        .create_package(NewPackage {
            name: "Home".into(),
            ..NewPackage::default()
        })
        .unwrap();

    let mut shell = shell(&conn, &["package home", "package nowhere", "quit"]);
    shell.run().unwrap();
    assert_eq!(
        shell.context().current_package().map(|p| p.name.as_str()),
        Some("Home")
    );
    let prompts = shell.prompter.prompts.clone();
    assert_eq!(prompts, vec!["notes: > ", "notes:Home > ", "notes:Home > "]);
    let output = String::from_utf8(shell.into_output()).unwrap();
    assert!(output.contains("Package 'nowhere' not found.\nAvailable packages:\n  - Home"));
}

#[test]
fn quick_view_ranks_and_truncates() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    for index in 0..12 {
        workspace
            .tasks
            .create_task(NewTask::titled(format!("Chore {index:02}")))
            .unwrap();
    }
    workspace
        .tasks
        .create_task(NewTask {
            priority: Priority::Urgent,
            ..NewTask::titled("Fire drill")
        })
        .unwrap();

    let output = run_script(&conn, &["ls", "quit"]);
    let section = output
        .split("Active Items:\n")
        .nth(1)
        .unwrap();
    let first_row = section.lines().next().unwrap();
    assert!(first_row.contains("[TODO] [U]"));
    assert!(first_row.ends_with("Fire drill"));
    assert!(section.contains("... and 3 more active tasks. Use 'tasks' to see all."));
}

#[test]
fn empty_quick_view_names_the_package() {
    let conn = open_db_in_memory().unwrap();
    Workspace::new(&conn)
        .packages
        .create_package(NewPackage {
            name: "Garden".into(),
            ..NewPackage::default()
        })
        .unwrap();
    let output = run_script(&conn, &["package garden", "ls -a", "quit"]);
    assert!(output.contains("All Items:\nNo tasks in Garden. Use 'create-task <title>' to create one."));
}

#[test]
fn ambiguous_complete_lists_candidates_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    workspace.tasks.create_task(NewTask::titled("Fix bug")).unwrap();
    workspace.tasks.create_task(NewTask::titled("Fix typo")).unwrap();

    let output = run_script(&conn, &["complete Fix", "complete nothing-like-this", "quit"]);
    assert!(output.contains("Multiple tasks match 'Fix':"));
    assert!(output.contains("Use the exact ID (8 characters) to specify which task:"));
    assert!(output.contains("Task 'nothing-like-this' not found."));

    let tasks = workspace.tasks.list_tasks(&TaskFilter::default()).unwrap();
    assert!(tasks.iter().all(|task| task.status == TaskStatus::Pending));
}

#[test]
fn linear_edit_saves_through_the_editor() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    workspace
        .tasks
        .create_task(NewTask {
            description: Some("D".into()),
            ..NewTask::titled("Old")
        })
        .unwrap();

    // title, description (blank) + clear, priority, status, due, tags, save
    let output = run_script(
        &conn,
        &["edit Old", "X", "", "y", "bogus", "", "", "", "", "quit"],
    );
    assert!(output.contains("Task 'X' updated successfully!"));

    let task = workspace.tasks.find_task("X").unwrap();
    assert_eq!(task.description, None);
    assert_eq!(task.priority, Priority::Medium);
}

#[test]
fn remove_falls_through_to_notes_and_respects_no() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    workspace
        .notes
        .create_note(NewNote {
            title: "Meeting minutes".into(),
            ..NewNote::default()
        })
        .unwrap();

    let output = run_script(&conn, &["rm meeting", "n", "rm meeting", "yes", "quit"]);
    assert!(output.contains("Deletion cancelled."));
    assert!(output.contains("Note 'Meeting minutes' deleted."));
    assert!(workspace
        .notes
        .list_notes(&NoteFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn removing_current_package_cascades_and_resets_context() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    let package = workspace
        .packages
        .create_package(NewPackage {
            name: "Launch".into(),
            ..NewPackage::default()
        })
        .unwrap();
    workspace
        .tasks
        .create_task(NewTask {
            package_id: Some(package.id.clone()),
            ..NewTask::titled("Press kit")
        })
        .unwrap();

    let mut shell = shell(&conn, &["package launch", "rm Launch", "y", "quit"]);
    shell.run().unwrap();
    assert!(shell.context().current_package().is_none());
    let output = String::from_utf8(shell.into_output()).unwrap();
    assert!(output.contains("WARNING: Package 'Launch' contains:\n  1 tasks\n"));
    assert!(output.contains("Package 'Launch' and all its contents deleted."));

    assert!(workspace.tasks.list_tasks(&TaskFilter::default()).unwrap().is_empty());
    assert!(workspace
        .packages
        .list_packages(&PackageFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn archive_cancels_tasks_and_skips_notes() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    workspace.tasks.create_task(NewTask::titled("Old idea")).unwrap();
    workspace
        .notes
        .create_note(NewNote {
            title: "Journal".into(),
            ..NewNote::default()
        })
        .unwrap();

    let output = run_script(&conn, &["archive old", "archive journal", "quit"]);
    assert!(output.contains("Task 'Old idea' archived."));
    assert!(output.contains("Task 'journal' not found."));
    assert_eq!(
        workspace.tasks.find_task("Old idea").unwrap().status,
        TaskStatus::Cancelled
    );
}

#[test]
fn create_note_reads_until_dot_line() {
    let conn = open_db_in_memory().unwrap();
    let output = run_script(
        &conn,
        &["create-note Ideas", "# Big", "- small", ".", "x, y", "note ideas", "quit"],
    );
    assert!(output.contains("Note 'Ideas' created successfully!"));
    assert!(output.contains("Note: Ideas\n"));

    let note = Workspace::new(&conn).notes.find_note("Ideas").unwrap();
    assert_eq!(note.content, "# Big\n- small");
    assert_eq!(note.tags, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn search_groups_sections() {
    let conn = open_db_in_memory().unwrap();
    let workspace = Workspace::new(&conn);
    workspace.tasks.create_task(NewTask::titled("Budget review")).unwrap();
    workspace
        .packages
        .create_package(NewPackage {
            name: "Budget 2031".into(),
            ..NewPackage::default()
        })
        .unwrap();

    let output = run_script(&conn, &["s budget", "find zebra", "quit"]);
    assert!(output.contains("Search results for 'budget' (2 results):"));
    assert!(output.contains("=== TASKS ==="));
    assert!(output.contains("=== PACKAGES ==="));
    assert!(!output.contains("=== NOTES ==="));
    assert!(output.contains("No results found for 'zebra'"));
}
