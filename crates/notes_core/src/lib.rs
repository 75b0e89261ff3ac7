//! Core domain logic for the notes organizer.
//! This crate is the single source of truth for business invariants; the
//! shell, the CLI and the HTTP API are thin adapters over it.

pub mod config;
pub mod dates;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod present;
pub mod repo;
pub mod resolve;
pub mod search;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError};
pub use editor::{EditField, EditorOutcome, FieldEditor, InputEvent};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::Note;
pub use model::package::{Package, PackageStatus};
pub use model::task::{Priority, Task, TaskStatus};
pub use model::{short_id, EntityId, ValidationError};
pub use repo::note_repo::{NoteFilter, NoteRepository, SqliteNoteRepository};
pub use repo::package_repo::{
    CascadeSummary, PackageFilter, PackageRepository, SqlitePackageRepository,
};
pub use repo::task_repo::{SqliteTaskRepository, TaskFilter, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use resolve::{resolve, EntityKind, EntityRef, Resolution, Resolvable};
pub use search::{search_all, SearchResults};
pub use service::note_service::{NewNote, NotePatch, NoteService};
pub use service::package_service::{NewPackage, PackageDetails, PackagePatch, PackageService};
pub use service::stats::Stats;
pub use service::task_service::{NewTask, TaskPatch, TaskService};
pub use service::workspace::Workspace;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
