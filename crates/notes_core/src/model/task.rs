//! Task domain model.
//!
//! # Responsibility
//! - Define the actionable record with status/priority lifecycle metadata.
//! - Own the status transition rule for `completed_at` bookkeeping.
//!
//! # Invariants
//! - `id` is generated once and never reassigned.
//! - `title` is non-blank for every persisted task.
//! - `completed_at` is stamped when status first enters `Completed` and is
//!   kept as "last completion time" when status later moves away.

use super::{new_entity_id, now_epoch_ms, EntityId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Pending,
    /// Work is in progress.
    InProgress,
    /// Finished.
    Completed,
    /// No longer actionable. Shell `archive` moves tasks here.
    Cancelled,
}

impl TaskStatus {
    /// All statuses in display/sort order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Stable wire/storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a wire name. Returns `None` for anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the task still needs attention.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ValidationError::InvalidTaskStatus(value.to_string()))
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ValidationError::InvalidPriority(value.to_string()))
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Unix epoch milliseconds.
    pub due_at: Option<i64>,
    /// Owning package. Not enforced by storage.
    pub package_id: Option<EntityId>,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Last time the task entered `Completed`.
    pub completed_at: Option<i64>,
}

impl Task {
    /// Creates a pending, medium-priority task with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: new_entity_id(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_at: None,
            package_id: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Moves to `status`, stamping `completed_at` on the first completion.
    pub fn set_status(&mut self, status: TaskStatus, now: i64) {
        self.status = status;
        if status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Explicit "complete" command: always re-stamps the completion time.
    pub fn mark_completed(&mut self, now: i64) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskStatus};

    #[test]
    fn status_wire_names_roundtrip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("in_progress"), None);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn first_completion_stamps_and_later_reopen_keeps_timestamp() {
        let mut task = Task::new("ship");
        task.set_status(TaskStatus::Completed, 1_000);
        assert_eq!(task.completed_at, Some(1_000));

        task.set_status(TaskStatus::InProgress, 2_000);
        assert_eq!(task.completed_at, Some(1_000));

        task.set_status(TaskStatus::Completed, 3_000);
        assert_eq!(task.completed_at, Some(1_000));

        task.mark_completed(4_000);
        assert_eq!(task.completed_at, Some(4_000));
        assert_eq!(task.updated_at, 4_000);
    }

    #[test]
    fn new_task_defaults() {
        let task = Task::new("write docs");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.validate().is_ok());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn serializes_status_in_kebab_case() {
        let mut task = Task::new("x");
        task.status = TaskStatus::InProgress;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["priority"], "medium");
    }
}
