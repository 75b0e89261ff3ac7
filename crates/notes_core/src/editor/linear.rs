//! Line-by-line editing for terminals without raw input.
//!
//! Fields are prompted in display order. A blank answer keeps the current
//! value; clearable fields then offer an explicit `(y/N)` clear. Answers
//! land in a `FieldEditor`, so committing goes through the same coercion
//! as the interactive mode.

use super::field::EditField;
use super::machine::{EditorOutcome, FieldEditor};
use crate::model::task::Task;

/// What the user asked for on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearAnswer {
    Keep,
    Replace(String),
    Clear,
}

impl LinearAnswer {
    /// Writes the answer into the editor's confirmed values.
    pub fn apply(self, editor: &mut FieldEditor, field: EditField) {
        match self {
            Self::Keep => {}
            Self::Replace(value) => editor.set_value(field, value),
            Self::Clear => editor.set_value(field, String::new()),
        }
    }
}

/// Prompt text for one field, e.g. `Priority [medium] (low|medium|high|urgent): `.
pub fn field_prompt(field: EditField, current: &str) -> String {
    let hint = field.hint();
    if hint.is_empty() {
        format!("{} [{}]: ", field.label(), current)
    } else {
        format!("{} [{}] ({}): ", field.label(), current, hint)
    }
}

pub fn clear_prompt(field: EditField) -> String {
    format!("Clear {}? (y/N): ", field.label().to_lowercase())
}

pub const SAVE_PROMPT: &str = "Save changes? (Y/n): ";

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Runs the prompt sequence for `task`.
///
/// `ask` prints a prompt and returns the raw reply line. The returned editor
/// holds the confirmed values; apply it only when the outcome is `Saved`.
pub fn edit_linear<E>(
    task: &Task,
    mut ask: impl FnMut(&str) -> Result<String, E>,
) -> Result<(FieldEditor, EditorOutcome), E> {
    let mut editor = FieldEditor::new(task);

    for field in EditField::ALL {
        let current = editor.value(field).to_string();
        let reply = ask(&field_prompt(field, &current))?;
        let answer = if !reply.trim().is_empty() {
            LinearAnswer::Replace(reply.trim().to_string())
        } else if field.clearable() && !current.is_empty() && is_yes(&ask(&clear_prompt(field))?)
        {
            LinearAnswer::Clear
        } else {
            LinearAnswer::Keep
        };
        answer.apply(&mut editor, field);
    }

    let confirm = ask(SAVE_PROMPT)?;
    let outcome = if confirm.trim().is_empty() || is_yes(&confirm) {
        EditorOutcome::Saved
    } else {
        EditorOutcome::Cancelled
    };
    Ok((editor, outcome))
}
