use notes_core::editor::{edit_linear, EditField, EditorOutcome, FieldEditor, InputEvent};
use notes_core::{Priority, Task, TaskStatus};
use std::collections::VecDeque;
use std::convert::Infallible;

fn old_task() -> Task {
    let mut task = Task::new("Old");
    task.description = Some("D".into());
    task.priority = Priority::High;
    task.tags = vec!["home".into()];
    task.due_at = Some(1_780_000_000_000);
    task.created_at = 1_000;
    task.updated_at = 1_000;
    task
}

fn scripted(replies: &[&str]) -> impl FnMut(&str) -> Result<String, Infallible> {
    let mut queue: VecDeque<String> = replies.iter().map(|reply| reply.to_string()).collect();
    move |_prompt| Ok(queue.pop_front().unwrap_or_default())
}

/// Replaces the focused buffer with `text`.
fn retype(text: &str, current: &str) -> Vec<InputEvent> {
    let mut events = vec![InputEvent::Confirm];
    events.extend(std::iter::repeat(InputEvent::Backspace).take(current.chars().count()));
    events.extend(InputEvent::typed(text));
    events.push(InputEvent::Confirm);
    events
}

#[test]
fn edit_title_and_clear_description() {
    let original = old_task();
    let mut editor = FieldEditor::new(&original);

    let mut events = retype("X", "Old");
    events.push(InputEvent::FocusDown);
    events.extend(retype("", "D"));
    events.push(InputEvent::Save);
    assert_eq!(editor.handle_all(events), Some(EditorOutcome::Saved));

    let mut edited = original.clone();
    editor.apply_to(&mut edited, 5_000);

    assert_eq!(edited.title, "X");
    assert_eq!(edited.description, None);
    assert_eq!(edited.updated_at, 5_000);

    let mut expected = original.clone();
    expected.title = "X".into();
    expected.description = None;
    expected.updated_at = 5_000;
    assert_eq!(edited, expected);
}

#[test]
fn bogus_priority_is_silently_ignored() {
    let original = old_task();
    let mut editor = FieldEditor::new(&original);

    let mut events = vec![InputEvent::FocusDown, InputEvent::FocusDown];
    events.extend(retype("bogus", "high"));
    events.push(InputEvent::Save);
    editor.handle_all(events);
    assert_eq!(editor.value(EditField::Priority), "bogus");

    let mut edited = original.clone();
    editor.apply_to(&mut edited, 2_000);
    assert_eq!(edited.priority, Priority::High);
}

#[test]
fn cancel_leaves_the_task_untouched() {
    let original = old_task();
    let mut editor = FieldEditor::new(&original);
    let mut events = retype("changed", "Old");
    events.push(InputEvent::Cancel);
    assert_eq!(editor.handle_all(events), Some(EditorOutcome::Cancelled));
}

#[test]
fn completing_through_the_editor_stamps_completion_once() {
    let original = old_task();
    let mut editor = FieldEditor::new(&original);
    let mut events = vec![InputEvent::FocusDown; 3];
    events.extend(retype("completed", "pending"));
    events.push(InputEvent::Save);
    editor.handle_all(events);

    let mut edited = original.clone();
    editor.apply_to(&mut edited, 9_000);
    assert_eq!(edited.status, TaskStatus::Completed);
    assert_eq!(edited.completed_at, Some(9_000));
}

#[test]
fn linear_mode_matches_the_state_machine() {
    let original = old_task();

    // Intended edits: title -> "Renamed", clear description, priority ->
    // urgent, status unchanged, clear due date, tags -> "a, b".
    let mut machine = FieldEditor::new(&original);
    let mut events = retype("Renamed", "Old");
    events.push(InputEvent::FocusDown);
    events.extend(retype("", "D"));
    events.push(InputEvent::FocusDown);
    events.extend(retype("urgent", "high"));
    events.extend([InputEvent::FocusDown, InputEvent::FocusDown]);
    let due_seed = machine.value(EditField::DueDate).to_string();
    events.extend(retype("", &due_seed));
    events.push(InputEvent::FocusDown);
    events.extend(retype("a, b", "home"));
    events.push(InputEvent::Save);
    assert_eq!(machine.handle_all(events), Some(EditorOutcome::Saved));

    let (linear, outcome) = edit_linear(
        &original,
        scripted(&[
            "Renamed", // title
            "", "y",   // description: keep? no, clear
            "urgent",  // priority
            "",        // status
            "", "y",   // due date: clear
            "a, b",    // tags
            "",        // save (default yes)
        ]),
    )
    .unwrap();
    assert_eq!(outcome, EditorOutcome::Saved);

    let mut via_machine = original.clone();
    machine.apply_to(&mut via_machine, 7_000);
    let mut via_linear = original.clone();
    linear.apply_to(&mut via_linear, 7_000);

    assert_eq!(via_machine, via_linear);
    assert_eq!(via_linear.title, "Renamed");
    assert_eq!(via_linear.description, None);
    assert_eq!(via_linear.priority, Priority::Urgent);
    assert_eq!(via_linear.due_at, None);
    assert_eq!(via_linear.tags, vec!["a".to_string(), "b".to_string()]);
}
