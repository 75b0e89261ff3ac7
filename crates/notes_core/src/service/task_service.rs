//! Task use-case service.
//!
//! # Responsibility
//! - Create, resolve, patch and delete tasks.
//! - Own the explicit status-change path (strict) and the editor save path
//!   (lenient).
//!
//! # Invariants
//! - Every mutation refreshes `updated_at` and is a single repository call.
//! - `complete` always re-stamps `completed_at`; other transitions into
//!   `completed` stamp it only when absent.

use super::{clean_list, require_unique, ServiceError, ServiceResult};
use crate::editor::FieldEditor;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::{now_epoch_ms, short_id, EntityId};
use crate::repo::task_repo::{TaskFilter, TaskRepository};
use crate::resolve::{resolve, EntityKind, EntityRef, Resolution};
use log::info;

/// Input for task creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_at: Option<i64>,
    pub package_id: Option<EntityId>,
    pub tags: Vec<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update. `None` leaves a field untouched; the nested `Option`
/// on nullable fields distinguishes "clear" from "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    /// Wire name; rejected when outside the enum.
    pub status: Option<String>,
    /// Wire name; rejected when outside the enum.
    pub priority: Option<String>,
    pub due_at: Option<Option<i64>>,
    pub package_id: Option<Option<EntityId>>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_task(&self, input: NewTask) -> ServiceResult<Task> {
        let mut task = Task::new(input.title.trim());
        task.description = input.description.filter(|text| !text.trim().is_empty());
        task.priority = input.priority;
        task.due_at = input.due_at;
        task.package_id = input.package_id;
        task.tags = clean_list(input.tags);
        if input.status != TaskStatus::Pending {
            task.set_status(input.status, task.created_at);
        }

        self.repo.create_task(&task)?;
        info!(
            "event=task_create module=service status=ok id={}",
            short_id(&task.id)
        );
        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> ServiceResult<Option<Task>> {
        Ok(self.repo.get_task(id)?)
    }

    /// Exact-id fetch that reports a missing record as `NotFound`.
    pub fn require_task(&self, id: &str) -> ServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Task, id))
    }

    pub fn list_tasks(&self, filter: &TaskFilter) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks(filter)?)
    }

    /// Resolves user text (exact id, id prefix or title fragment).
    pub fn resolve_task(&self, identifier: &str) -> ServiceResult<Resolution<Task>> {
        if let Some(task) = self.repo.get_task(identifier)? {
            return Ok(Resolution::Unique(task));
        }
        Ok(resolve(
            identifier,
            self.repo.list_tasks(&TaskFilter::default())?,
        ))
    }

    /// Like `resolve_task`, but ambiguity and absence become errors.
    pub fn find_task(&self, identifier: &str) -> ServiceResult<Task> {
        let resolution = self.resolve_task(identifier)?;
        require_unique(EntityKind::Task, identifier, resolution, EntityRef::Task)
    }

    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> ServiceResult<Task> {
        let mut task = self.require_task(id)?;
        let now = now_epoch_ms();

        // Parse enums before touching the record so a bad value changes nothing.
        let status = patch
            .status
            .as_deref()
            .map(|value| value.trim().parse::<TaskStatus>())
            .transpose()?;
        let priority = patch
            .priority
            .as_deref()
            .map(|value| value.trim().parse::<Priority>())
            .transpose()?;

        if let Some(title) = patch.title.as_ref() {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description.as_ref() {
            task.description = description
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned();
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(due_at) = patch.due_at {
            task.due_at = due_at;
        }
        if let Some(package_id) = patch.package_id.as_ref() {
            task.package_id = package_id.clone();
        }
        if let Some(tags) = patch.tags.as_ref() {
            task.tags = clean_list(tags.clone());
        }
        if let Some(status) = status {
            task.set_status(status, now);
        }
        task.updated_at = now;

        self.repo.update_task(&task)?;
        info!(
            "event=task_update module=service status=ok id={}",
            short_id(&task.id)
        );
        Ok(task)
    }

    /// Explicit status change; unknown names are a validation error.
    pub fn set_status(&self, id: &str, status: &str) -> ServiceResult<Task> {
        let status = status.trim().parse::<TaskStatus>()?;
        let mut task = self.require_task(id)?;
        task.set_status(status, now_epoch_ms());
        self.repo.update_task(&task)?;
        Ok(task)
    }

    pub fn complete_task(&self, id: &str) -> ServiceResult<Task> {
        let mut task = self.require_task(id)?;
        task.mark_completed(now_epoch_ms());
        self.repo.update_task(&task)?;
        info!(
            "event=task_complete module=service status=ok id={}",
            short_id(&task.id)
        );
        Ok(task)
    }

    /// Archiving a task moves it to `cancelled`.
    pub fn archive_task(&self, id: &str) -> ServiceResult<Task> {
        let mut task = self.require_task(id)?;
        task.set_status(TaskStatus::Cancelled, now_epoch_ms());
        self.repo.update_task(&task)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.delete_task(id)? {
            return Err(ServiceError::not_found(EntityKind::Task, id));
        }
        info!(
            "event=task_delete module=service status=ok id={}",
            short_id(id)
        );
        Ok(())
    }

    /// Commits a finished editor session onto `original` and persists it.
    pub fn save_edits(&self, original: &Task, editor: &FieldEditor) -> ServiceResult<Task> {
        let mut task = original.clone();
        editor.apply_to(&mut task, now_epoch_ms());
        self.repo.update_task(&task)?;
        info!(
            "event=task_edit module=service status=ok id={}",
            short_id(&task.id)
        );
        Ok(task)
    }
}
