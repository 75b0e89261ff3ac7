//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs shared by the
//!   shell, the CLI and the HTTP API.
//! - Turn resolver outcomes into typed not-found / ambiguity errors.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Explicit status changes reject out-of-enum values; only the field
//!   editor is lenient.

pub mod note_service;
pub mod package_service;
pub mod stats;
pub mod task_service;
pub mod workspace;

use crate::model::ValidationError;
use crate::repo::RepoError;
use crate::resolve::{EntityKind, EntityRef, Resolution};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    /// Nothing matched `identifier`.
    NotFound {
        kind: EntityKind,
        identifier: String,
    },
    /// Several records matched; the caller should list them and stop.
    Ambiguous {
        kind: EntityKind,
        identifier: String,
        candidates: Vec<EntityRef>,
    },
    Repo(RepoError),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            identifier: identifier.into(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, identifier } => {
                write!(f, "{} '{}' not found.", kind.label(), identifier)
            }
            Self::Ambiguous {
                kind,
                identifier,
                candidates,
            } => write!(
                f,
                "{} {}s match '{}'; be more specific",
                candidates.len(),
                kind,
                identifier
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::Ambiguous { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Collapses a resolution into the unique record or a typed error.
pub(crate) fn require_unique<T>(
    kind: EntityKind,
    identifier: &str,
    resolution: Resolution<T>,
    wrap: fn(T) -> EntityRef,
) -> ServiceResult<T> {
    match resolution {
        Resolution::Unique(found) => Ok(found),
        Resolution::Ambiguous(candidates) => Err(ServiceError::Ambiguous {
            kind,
            identifier: identifier.to_string(),
            candidates: candidates.into_iter().map(wrap).collect(),
        }),
        Resolution::NotFound => Err(ServiceError::not_found(kind, identifier)),
    }
}

/// Trims entries and drops blanks and repeats, keeping first occurrences.
pub(crate) fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() || cleaned.iter().any(|kept| kept == trimmed) {
            continue;
        }
        cleaned.push(trimmed.to_string());
    }
    cleaned
}
