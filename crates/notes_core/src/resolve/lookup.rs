//! Store-backed cross-kind resolution.
//!
//! Each kind tries an exact-id `get` first, then falls back to resolving
//! against every record of the kind (no filter). Single-kind lookups live
//! on the services.

use super::dispatch::{resolve_any, EntityKind, EntityRef};
use super::resolver::Resolution;
use crate::repo::note_repo::{NoteFilter, NoteRepository, SqliteNoteRepository};
use crate::repo::package_repo::{PackageFilter, PackageRepository, SqlitePackageRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskFilter, TaskRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Resolves across `kinds` in order, with the exact-id fast path per kind.
pub fn resolve_entity(
    conn: &Connection,
    identifier: &str,
    kinds: &[EntityKind],
) -> RepoResult<Resolution<EntityRef>> {
    resolve_any(identifier, kinds, |kind| {
        let exact = get_entity(conn, kind, identifier)?;
        match exact {
            Some(found) => Ok(vec![found]),
            None => list_entities(conn, kind),
        }
    })
}

/// Exact-id lookup for one kind.
pub fn get_entity(conn: &Connection, kind: EntityKind, id: &str) -> RepoResult<Option<EntityRef>> {
    Ok(match kind {
        EntityKind::Task => SqliteTaskRepository::new(conn)
            .get_task(id)?
            .map(EntityRef::Task),
        EntityKind::Note => SqliteNoteRepository::new(conn)
            .get_note(id)?
            .map(EntityRef::Note),
        EntityKind::Package => SqlitePackageRepository::new(conn)
            .get_package(id)?
            .map(EntityRef::Package),
    })
}

/// Full candidate pool for one kind.
pub fn list_entities(conn: &Connection, kind: EntityKind) -> RepoResult<Vec<EntityRef>> {
    Ok(match kind {
        EntityKind::Task => SqliteTaskRepository::new(conn)
            .list_tasks(&TaskFilter::default())?
            .into_iter()
            .map(EntityRef::Task)
            .collect(),
        EntityKind::Note => SqliteNoteRepository::new(conn)
            .list_notes(&NoteFilter::default())?
            .into_iter()
            .map(EntityRef::Note)
            .collect(),
        EntityKind::Package => SqlitePackageRepository::new(conn)
            .list_packages(&PackageFilter::default())?
            .into_iter()
            .map(EntityRef::Package)
            .collect(),
    })
}
