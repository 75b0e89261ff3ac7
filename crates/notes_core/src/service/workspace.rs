//! All services over one connection.
//!
//! Front ends open a connection, wrap it in a `Workspace` and drop both
//! when the command (or request) is done.

use super::note_service::NoteService;
use super::package_service::{package_details, PackageDetails, PackageService};
use super::stats::{collect_stats, Stats};
use super::task_service::TaskService;
use super::{ServiceError, ServiceResult};
use crate::model::ValidationError;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::package_repo::SqlitePackageRepository;
use crate::repo::task_repo::SqliteTaskRepository;
use crate::resolve::lookup::resolve_entity;
use crate::resolve::{EntityKind, EntityRef, Resolution, Resolvable};
use crate::search::{search_all, SearchResults};
use rusqlite::Connection;

pub struct Workspace<'conn> {
    conn: &'conn Connection,
    pub tasks: TaskService<SqliteTaskRepository<'conn>>,
    pub notes: NoteService<SqliteNoteRepository<'conn>>,
    pub packages: PackageService<SqlitePackageRepository<'conn>>,
}

impl<'conn> Workspace<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            tasks: TaskService::new(SqliteTaskRepository::new(conn)),
            notes: NoteService::new(SqliteNoteRepository::new(conn)),
            packages: PackageService::new(SqlitePackageRepository::new(conn)),
        }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn search(&self, query: &str) -> ServiceResult<SearchResults> {
        Ok(search_all(self.conn, query)?)
    }

    /// Resolves across `kinds` in order (see `resolve::dispatch`).
    pub fn resolve_entity(
        &self,
        identifier: &str,
        kinds: &[EntityKind],
    ) -> ServiceResult<Resolution<EntityRef>> {
        Ok(resolve_entity(self.conn, identifier, kinds)?)
    }

    /// Like `resolve_entity`, but ambiguity and absence become errors.
    ///
    /// `NotFound` reports the first kind tried.
    pub fn find_entity(&self, identifier: &str, kinds: &[EntityKind]) -> ServiceResult<EntityRef> {
        match self.resolve_entity(identifier, kinds)? {
            Resolution::Unique(found) => Ok(found),
            Resolution::Ambiguous(candidates) => Err(ServiceError::Ambiguous {
                kind: candidates
                    .first()
                    .map_or(EntityKind::Task, EntityRef::kind),
                identifier: identifier.to_string(),
                candidates,
            }),
            Resolution::NotFound => Err(ServiceError::not_found(
                kinds.first().copied().unwrap_or(EntityKind::Task),
                identifier,
            )),
        }
    }

    /// Deletes any resolved record; packages cascade.
    pub fn delete_entity(&self, entity: &EntityRef) -> ServiceResult<()> {
        match entity {
            EntityRef::Task(task) => self.tasks.delete_task(&task.id),
            EntityRef::Note(note) => self.notes.delete_note(&note.id),
            EntityRef::Package(package) => self.packages.delete_package(&package.id).map(|_| ()),
        }
    }

    /// Tasks become `cancelled`, packages `archived`. Notes have no such state.
    pub fn archive_entity(&self, entity: &EntityRef) -> ServiceResult<EntityRef> {
        match entity {
            EntityRef::Task(task) => self.tasks.archive_task(task.id()).map(EntityRef::Task),
            EntityRef::Package(package) => self
                .packages
                .archive_package(package.id())
                .map(EntityRef::Package),
            EntityRef::Note(_) => Err(ValidationError::NotArchivable("note").into()),
        }
    }

    pub fn package_details(&self, id: &str) -> ServiceResult<PackageDetails> {
        package_details(
            &SqliteTaskRepository::new(self.conn),
            &SqliteNoteRepository::new(self.conn),
            &SqlitePackageRepository::new(self.conn),
            id,
        )
    }

    pub fn stats(&self) -> ServiceResult<Stats> {
        collect_stats(
            &SqliteTaskRepository::new(self.conn),
            &SqliteNoteRepository::new(self.conn),
            &SqlitePackageRepository::new(self.conn),
        )
    }
}
