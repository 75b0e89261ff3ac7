//! Package (project container) domain model.
//!
//! # Invariants
//! - Packages form a forest through `parent_id`; acyclicity is not checked
//!   here or in storage.

use super::{new_entity_id, now_epoch_ms, EntityId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Package lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    #[default]
    Active,
    Archived,
    Completed,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 3] = [
        PackageStatus::Active,
        PackageStatus::Archived,
        PackageStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for PackageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ValidationError::InvalidPackageStatus(value.to_string()))
    }
}

/// Grouping container for tasks and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<EntityId>,
    /// Unix epoch milliseconds.
    pub due_at: Option<i64>,
    pub status: PackageStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: new_entity_id(),
            name: name.into(),
            description: None,
            parent_id: None,
            due_at: None,
            status: PackageStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        Ok(())
    }

    pub fn set_status(&mut self, status: PackageStatus, now: i64) {
        self.status = status;
        self.updated_at = now;
    }

    pub fn archive(&mut self, now: i64) {
        self.set_status(PackageStatus::Archived, now);
    }
}
