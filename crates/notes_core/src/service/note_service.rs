//! Note use-case service.
//!
//! # Responsibility
//! - Create, resolve, patch and delete notes.
//! - Maintain the linked-task list.
//!
//! # Invariants
//! - Tags and linked ids are trimmed and deduplicated; no case folding.
//! - Linking a task that is already linked is a no-op, not an error.

use super::{clean_list, require_unique, ServiceError, ServiceResult};
use crate::model::note::Note;
use crate::model::{now_epoch_ms, short_id, EntityId};
use crate::repo::note_repo::{NoteFilter, NoteRepository};
use crate::resolve::{resolve, EntityKind, EntityRef, Resolution};
use log::info;

/// Input for note creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub package_id: Option<EntityId>,
    pub linked_tasks: Vec<EntityId>,
    pub tags: Vec<String>,
}

/// Partial note update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub package_id: Option<Option<EntityId>>,
    pub linked_tasks: Option<Vec<EntityId>>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_note(&self, input: NewNote) -> ServiceResult<Note> {
        let mut note = Note::new(input.title.trim(), input.content);
        note.package_id = input.package_id;
        note.tags = clean_list(input.tags);
        for task_id in clean_list(input.linked_tasks) {
            note.add_linked_task(&task_id, note.updated_at);
        }

        self.repo.create_note(&note)?;
        info!(
            "event=note_create module=service status=ok id={}",
            short_id(&note.id)
        );
        Ok(note)
    }

    pub fn get_note(&self, id: &str) -> ServiceResult<Option<Note>> {
        Ok(self.repo.get_note(id)?)
    }

    pub fn require_note(&self, id: &str) -> ServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Note, id))
    }

    pub fn list_notes(&self, filter: &NoteFilter) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(filter)?)
    }

    pub fn resolve_note(&self, identifier: &str) -> ServiceResult<Resolution<Note>> {
        if let Some(note) = self.repo.get_note(identifier)? {
            return Ok(Resolution::Unique(note));
        }
        Ok(resolve(
            identifier,
            self.repo.list_notes(&NoteFilter::default())?,
        ))
    }

    pub fn find_note(&self, identifier: &str) -> ServiceResult<Note> {
        let resolution = self.resolve_note(identifier)?;
        require_unique(EntityKind::Note, identifier, resolution, EntityRef::Note)
    }

    pub fn update_note(&self, id: &str, patch: &NotePatch) -> ServiceResult<Note> {
        let mut note = self.require_note(id)?;

        if let Some(title) = patch.title.as_ref() {
            note.title = title.trim().to_string();
        }
        if let Some(content) = patch.content.as_ref() {
            note.content = content.clone();
        }
        if let Some(package_id) = patch.package_id.as_ref() {
            note.package_id = package_id.clone();
        }
        if let Some(tags) = patch.tags.as_ref() {
            note.tags = clean_list(tags.clone());
        }
        if let Some(linked) = patch.linked_tasks.as_ref() {
            note.linked_tasks.clear();
            for task_id in clean_list(linked.clone()) {
                note.add_linked_task(&task_id, note.updated_at);
            }
        }
        note.updated_at = now_epoch_ms();

        self.repo.update_note(&note)?;
        info!(
            "event=note_update module=service status=ok id={}",
            short_id(&note.id)
        );
        Ok(note)
    }

    /// Links `task_id`; returns the note and whether anything changed.
    pub fn link_task(&self, note_id: &str, task_id: &str) -> ServiceResult<(Note, bool)> {
        let mut note = self.require_note(note_id)?;
        let changed = note.add_linked_task(task_id, now_epoch_ms());
        if changed {
            self.repo.update_note(&note)?;
        }
        Ok((note, changed))
    }

    pub fn unlink_task(&self, note_id: &str, task_id: &str) -> ServiceResult<(Note, bool)> {
        let mut note = self.require_note(note_id)?;
        let changed = note.remove_linked_task(task_id, now_epoch_ms());
        if changed {
            self.repo.update_note(&note)?;
        }
        Ok((note, changed))
    }

    pub fn delete_note(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.delete_note(id)? {
            return Err(ServiceError::not_found(EntityKind::Note, id));
        }
        info!(
            "event=note_delete module=service status=ok id={}",
            short_id(id)
        );
        Ok(())
    }
}
