//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist markdown notes with their package link, linked task ids and tags.
//!
//! # Invariants
//! - Listing order is `updated_at DESC, id ASC`.
//! - `linked_tasks` and `tags` are JSON array columns; linked ids are not
//!   checked against the `tasks` table.

use super::{decode_string_list, encode_string_list, RepoError, RepoResult};
use crate::model::note::Note;
use crate::model::EntityId;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    package_id,
    linked_tasks,
    tags,
    created_at,
    updated_at
FROM notes";

/// Query options for note listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Exact package id match.
    pub package_id: Option<EntityId>,
}

impl NoteFilter {
    pub fn in_package(package_id: impl Into<EntityId>) -> Self {
        Self {
            package_id: Some(package_id.into()),
        }
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<EntityId>;
    fn get_note(&self, id: &str) -> RepoResult<Option<Note>>;
    /// Full-row replace keyed by `note.id`.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: &str) -> RepoResult<bool>;
    fn list_notes(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<EntityId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (
                id,
                title,
                content,
                package_id,
                linked_tasks,
                tags,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                note.id.as_str(),
                note.title.as_str(),
                note.content.as_str(),
                note.package_id.as_deref(),
                encode_string_list(&note.linked_tasks)?,
                encode_string_list(&note.tags)?,
                note.created_at,
                note.updated_at,
            ],
        )?;

        Ok(note.id.clone())
    }

    fn get_note(&self, id: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt.query_row([id], |row| Ok(parse_note_row(row))).optional()?;
        row.transpose()
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2,
                package_id = ?3,
                linked_tasks = ?4,
                tags = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                note.title.as_str(),
                note.content.as_str(),
                note.package_id.as_deref(),
                encode_string_list(&note.linked_tasks)?,
                encode_string_list(&note.tags)?,
                note.updated_at,
                note.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id.clone()));
        }
        Ok(())
    }

    fn delete_note(&self, id: &str) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_notes(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>> {
        let mut notes = Vec::new();
        match filter.package_id.as_deref() {
            Some(package_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{NOTE_SELECT_SQL} WHERE package_id = ?1 ORDER BY updated_at DESC, id ASC;"
                ))?;
                let mut rows = stmt.query([package_id])?;
                while let Some(row) = rows.next()? {
                    notes.push(parse_note_row(row)?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "{NOTE_SELECT_SQL} ORDER BY updated_at DESC, id ASC;"
                ))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    notes.push(parse_note_row(row)?);
                }
            }
        }
        Ok(notes)
    }
}

pub(crate) fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get::<_, Option<String>>("content")?.unwrap_or_default(),
        package_id: row.get("package_id")?,
        linked_tasks: decode_string_list(row.get("linked_tasks")?, "notes.linked_tasks")?,
        tags: decode_string_list(row.get("tags")?, "notes.tags")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
