//! Domain model for tasks, notes and packages.
//!
//! # Responsibility
//! - Define the three record kinds and their lifecycle helpers.
//! - Provide id generation and the display short-id convention.
//!
//! # Invariants
//! - Every record is identified by an opaque, stable UUID string.
//! - Timestamps are Unix epoch milliseconds; local-time conversion happens
//!   only at parse/display boundaries (see `crate::dates`).

pub mod note;
pub mod package;
pub mod task;

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record identifier (UUID v4 text form).
pub type EntityId = String;

/// Length of the display short id.
pub const SHORT_ID_LEN: usize = 8;

/// Generates a fresh record id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Returns the display short id (first 8 chars). Uniqueness is not implied.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Splits comma-separated tag input, trimming and dropping empty pieces.
///
/// Exact duplicates keep their first occurrence only.
pub fn split_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for piece in input.split(',') {
        let tag = piece.trim();
        if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Joins tags back into the editable comma form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Write-path validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId,
    /// Task/note title is blank after trim.
    BlankTitle,
    /// Package name is blank after trim.
    BlankName,
    InvalidTaskStatus(String),
    InvalidPriority(String),
    InvalidPackageStatus(String),
    /// Date text could not be parsed.
    InvalidDate(String),
    /// Archive requested for a kind without an archived state.
    NotArchivable(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id must not be empty"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankName => write!(f, "name must not be blank"),
            Self::InvalidTaskStatus(value) => write!(
                f,
                "invalid status `{value}`; expected pending|in-progress|completed|cancelled"
            ),
            Self::InvalidPriority(value) => write!(
                f,
                "invalid priority `{value}`; expected low|medium|high|urgent"
            ),
            Self::InvalidPackageStatus(value) => write!(
                f,
                "invalid package status `{value}`; expected active|archived|completed"
            ),
            Self::InvalidDate(value) => write!(f, "unrecognized date `{value}`"),
            Self::NotArchivable(kind) => write!(f, "{kind}s cannot be archived"),
        }
    }
}

impl Error for ValidationError {}
