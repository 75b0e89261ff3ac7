//! Note domain model.
//!
//! # Invariants
//! - `linked_tasks` is referential only; ids are not checked against tasks.
//! - `linked_tasks` never holds the same id twice.

use super::{new_entity_id, now_epoch_ms, EntityId, ValidationError};
use serde::{Deserialize, Serialize};

/// Free-form markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    /// Markdown source text.
    pub content: String,
    pub package_id: Option<EntityId>,
    pub linked_tasks: Vec<EntityId>,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: new_entity_id(),
            title: title.into(),
            content: content.into(),
            package_id: None,
            linked_tasks: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Links one task id. Returns `false` when it was already linked.
    pub fn add_linked_task(&mut self, task_id: &str, now: i64) -> bool {
        if self.linked_tasks.iter().any(|linked| linked == task_id) {
            return false;
        }
        self.linked_tasks.push(task_id.to_string());
        self.updated_at = now;
        true
    }

    /// Unlinks one task id. Returns `false` when it was not linked.
    pub fn remove_linked_task(&mut self, task_id: &str, now: i64) -> bool {
        let before = self.linked_tasks.len();
        self.linked_tasks.retain(|linked| linked != task_id);
        if self.linked_tasks.len() == before {
            return false;
        }
        self.updated_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn linking_is_deduplicated_and_unlink_is_noop_when_missing() {
        let mut note = Note::new("meeting", "");
        assert!(note.add_linked_task("t-1", 10));
        assert!(!note.add_linked_task("t-1", 20));
        assert_eq!(note.linked_tasks, vec!["t-1".to_string()]);
        assert_eq!(note.updated_at, 10);

        assert!(!note.remove_linked_task("t-2", 30));
        assert_eq!(note.updated_at, 10);
        assert!(note.remove_linked_task("t-1", 40));
        assert!(note.linked_tasks.is_empty());
        assert_eq!(note.updated_at, 40);
    }

    #[test]
    fn blank_title_is_rejected() {
        let note = Note::new("   ", "body");
        assert!(note.validate().is_err());
    }
}
