//! Package use-case service.
//!
//! # Responsibility
//! - Create, resolve, patch, archive and delete packages.
//! - Assemble package detail views with their tasks, notes and children.
//!
//! # Invariants
//! - Deleting a package always cascades to its tasks and notes and detaches
//!   child packages, whatever surface asked for it.
//! - Name lookup for `--package NAME` options is exact and case-insensitive.

use super::{require_unique, ServiceError, ServiceResult};
use crate::model::note::Note;
use crate::model::package::{Package, PackageStatus};
use crate::model::task::Task;
use crate::model::{now_epoch_ms, short_id, EntityId};
use crate::repo::note_repo::{NoteFilter, NoteRepository};
use crate::repo::package_repo::{CascadeSummary, PackageFilter, PackageRepository};
use crate::repo::task_repo::{TaskFilter, TaskRepository};
use crate::resolve::{resolve, EntityKind, EntityRef, Resolution};
use log::info;
use serde::Serialize;

/// Input for package creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPackage {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<EntityId>,
    pub due_at: Option<i64>,
}

/// Partial package update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_id: Option<Option<EntityId>>,
    pub due_at: Option<Option<i64>>,
    /// Wire name; rejected when outside the enum.
    pub status: Option<String>,
}

impl PackagePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A package with everything that points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDetails {
    #[serde(flatten)]
    pub package: Package,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub child_packages: Vec<Package>,
}

/// Package service facade over repository implementations.
pub struct PackageService<R: PackageRepository> {
    repo: R,
}

impl<R: PackageRepository> PackageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_package(&self, input: NewPackage) -> ServiceResult<Package> {
        let mut package = Package::new(input.name.trim());
        package.description = input.description.filter(|text| !text.trim().is_empty());
        package.parent_id = input.parent_id;
        package.due_at = input.due_at;

        self.repo.create_package(&package)?;
        info!(
            "event=package_create module=service status=ok id={}",
            short_id(&package.id)
        );
        Ok(package)
    }

    pub fn get_package(&self, id: &str) -> ServiceResult<Option<Package>> {
        Ok(self.repo.get_package(id)?)
    }

    pub fn require_package(&self, id: &str) -> ServiceResult<Package> {
        self.repo
            .get_package(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, id))
    }

    pub fn list_packages(&self, filter: &PackageFilter) -> ServiceResult<Vec<Package>> {
        Ok(self.repo.list_packages(filter)?)
    }

    pub fn resolve_package(&self, identifier: &str) -> ServiceResult<Resolution<Package>> {
        if let Some(package) = self.repo.get_package(identifier)? {
            return Ok(Resolution::Unique(package));
        }
        Ok(resolve(
            identifier,
            self.repo.list_packages(&PackageFilter::default())?,
        ))
    }

    pub fn find_package(&self, identifier: &str) -> ServiceResult<Package> {
        let resolution = self.resolve_package(identifier)?;
        require_unique(
            EntityKind::Package,
            identifier,
            resolution,
            EntityRef::Package,
        )
    }

    /// First package (newest first) whose name equals `name` ignoring case.
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Option<Package>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .repo
            .list_packages(&PackageFilter::default())?
            .into_iter()
            .find(|package| package.name.to_lowercase() == wanted))
    }

    /// Like `find_by_name`, but a missing name is `NotFound`.
    pub fn require_by_name(&self, name: &str) -> ServiceResult<Package> {
        self.find_by_name(name)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, name))
    }

    pub fn update_package(&self, id: &str, patch: &PackagePatch) -> ServiceResult<Package> {
        let mut package = self.require_package(id)?;
        let status = patch
            .status
            .as_deref()
            .map(|value| value.trim().parse::<PackageStatus>())
            .transpose()?;

        if let Some(name) = patch.name.as_ref() {
            package.name = name.trim().to_string();
        }
        if let Some(description) = patch.description.as_ref() {
            package.description = description
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned();
        }
        if let Some(parent_id) = patch.parent_id.as_ref() {
            package.parent_id = parent_id.clone();
        }
        if let Some(due_at) = patch.due_at {
            package.due_at = due_at;
        }
        if let Some(status) = status {
            package.status = status;
        }
        package.updated_at = now_epoch_ms();

        self.repo.update_package(&package)?;
        info!(
            "event=package_update module=service status=ok id={}",
            short_id(&package.id)
        );
        Ok(package)
    }

    /// Explicit status change; unknown names are a validation error.
    pub fn set_status(&self, id: &str, status: &str) -> ServiceResult<Package> {
        let status = status.trim().parse::<PackageStatus>()?;
        let mut package = self.require_package(id)?;
        package.set_status(status, now_epoch_ms());
        self.repo.update_package(&package)?;
        Ok(package)
    }

    pub fn archive_package(&self, id: &str) -> ServiceResult<Package> {
        let mut package = self.require_package(id)?;
        package.archive(now_epoch_ms());
        self.repo.update_package(&package)?;
        Ok(package)
    }

    /// Deletes the package, its tasks and its notes in one transaction.
    pub fn delete_package(&self, id: &str) -> ServiceResult<CascadeSummary> {
        let summary = self
            .repo
            .delete_with_contents(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, id))?;
        info!(
            "event=package_delete module=service status=ok id={} tasks={} notes={} detached={}",
            short_id(id),
            summary.tasks_deleted,
            summary.notes_deleted,
            summary.packages_detached
        );
        Ok(summary)
    }
}

/// Loads a package with its tasks, notes and direct children.
pub fn package_details<T, N, P>(
    tasks: &T,
    notes: &N,
    packages: &P,
    id: &str,
) -> ServiceResult<PackageDetails>
where
    T: TaskRepository,
    N: NoteRepository,
    P: PackageRepository,
{
    let package = packages
        .get_package(id)?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Package, id))?;

    Ok(PackageDetails {
        tasks: tasks.list_tasks(&TaskFilter::in_package(id))?,
        notes: notes.list_notes(&NoteFilter::in_package(id))?,
        child_packages: packages.list_packages(&PackageFilter {
            parent_id: Some(package.id.clone()),
            ..PackageFilter::default()
        })?,
        package,
    })
}
