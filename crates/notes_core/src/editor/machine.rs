//! Navigating/editing state machine over abstract input events.

use super::field::{coerce_into, seed_all, EditField, FIELD_COUNT};
use crate::model::task::Task;

/// Terminal-independent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    FocusUp,
    FocusDown,
    /// Begin editing the focused field, or commit the edit buffer.
    Confirm,
    /// Discard the edit buffer.
    Abort,
    Char(char),
    Backspace,
    /// Finish the session keeping confirmed edits.
    Save,
    /// Finish the session discarding everything.
    Cancel,
}

impl InputEvent {
    /// Events that type `text` into the edit buffer.
    pub fn typed(text: &str) -> impl Iterator<Item = InputEvent> + '_ {
        text.chars().map(InputEvent::Char)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Navigating { focus: usize },
    Editing { focus: usize, buffer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved,
    Cancelled,
}

/// Editing session for one task.
///
/// Confirmed edits live in an in-memory field list; nothing reaches the
/// task until `apply_to` runs after a `Saved` outcome.
#[derive(Debug, Clone)]
pub struct FieldEditor {
    values: [String; FIELD_COUNT],
    state: EditorState,
    outcome: Option<EditorOutcome>,
}

impl FieldEditor {
    pub fn new(task: &Task) -> Self {
        Self {
            values: seed_all(task),
            state: EditorState::Navigating { focus: 0 },
            outcome: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn outcome(&self) -> Option<EditorOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn focused(&self) -> EditField {
        let focus = match &self.state {
            EditorState::Navigating { focus } | EditorState::Editing { focus, .. } => *focus,
        };
        EditField::ALL[focus]
    }

    /// Confirmed value of `field`.
    pub fn value(&self, field: EditField) -> &str {
        &self.values[field.index()]
    }

    /// Fields with their confirmed values, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (EditField, &str)> + '_ {
        EditField::ALL
            .iter()
            .map(move |field| (*field, self.values[field.index()].as_str()))
    }

    /// Replaces a confirmed value directly. Used by the line-by-line mode.
    pub fn set_value(&mut self, field: EditField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Feeds one event. Returns the outcome once the session terminates;
    /// events after termination are ignored.
    pub fn handle(&mut self, event: InputEvent) -> Option<EditorOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let next = match std::mem::replace(&mut self.state, EditorState::Navigating { focus: 0 }) {
            EditorState::Navigating { focus } => match event {
                InputEvent::FocusUp => EditorState::Navigating {
                    focus: focus.saturating_sub(1),
                },
                InputEvent::FocusDown => EditorState::Navigating {
                    focus: (focus + 1).min(FIELD_COUNT - 1),
                },
                InputEvent::Confirm => EditorState::Editing {
                    focus,
                    buffer: self.values[focus].clone(),
                },
                InputEvent::Save => {
                    self.outcome = Some(EditorOutcome::Saved);
                    EditorState::Navigating { focus }
                }
                InputEvent::Cancel => {
                    self.outcome = Some(EditorOutcome::Cancelled);
                    EditorState::Navigating { focus }
                }
                InputEvent::Abort | InputEvent::Char(_) | InputEvent::Backspace => {
                    EditorState::Navigating { focus }
                }
            },
            EditorState::Editing { focus, mut buffer } => match event {
                InputEvent::Char(ch) => {
                    buffer.push(ch);
                    EditorState::Editing { focus, buffer }
                }
                InputEvent::Backspace => {
                    buffer.pop();
                    EditorState::Editing { focus, buffer }
                }
                InputEvent::Confirm => {
                    self.values[focus] = buffer;
                    EditorState::Navigating { focus }
                }
                InputEvent::Abort => EditorState::Navigating { focus },
                InputEvent::FocusUp
                | InputEvent::FocusDown
                | InputEvent::Save
                | InputEvent::Cancel => EditorState::Editing { focus, buffer },
            },
        };
        self.state = next;
        self.outcome
    }

    /// Feeds events in order, stopping at termination.
    pub fn handle_all(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Option<EditorOutcome> {
        for event in events {
            if let Some(outcome) = self.handle(event) {
                return Some(outcome);
            }
        }
        self.outcome
    }

    /// Coerces confirmed values into `task` and refreshes `updated_at`.
    pub fn apply_to(&self, task: &mut Task, now: i64) {
        coerce_into(task, &self.values, now);
    }
}
