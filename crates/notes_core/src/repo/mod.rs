//! Record store: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define one data access contract per record kind.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Write paths validate the record before any SQL mutation.
//! - `update` is a full-row replace keyed by id and reports `NotFound`
//!   when no row matched.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Each call is atomic on its own; no cross-call transactions.

pub mod note_repo;
pub mod package_repo;
pub mod task_repo;

use crate::db::DbError;
use crate::model::{EntityId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(EntityId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Encodes a string list column (`tags`, `linked_tasks`) as a JSON array.
pub(crate) fn encode_string_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode list column: {err}")))
}

/// Decodes a JSON array column; `NULL` and empty text decode as empty.
pub(crate) fn decode_string_list(
    raw: Option<String>,
    column: &'static str,
) -> RepoResult<Vec<String>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|err| {
            RepoError::InvalidData(format!("invalid JSON list in {column}: {err}"))
        }),
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, escaping wildcards.
///
/// Pair with `ESCAPE '\'` in SQL.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, decode_string_list, encode_string_list};

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn list_columns_roundtrip_and_tolerate_null() {
        let encoded = encode_string_list(&["a".to_string(), "b c".to_string()]).unwrap();
        assert_eq!(
            decode_string_list(Some(encoded), "tags").unwrap(),
            vec!["a".to_string(), "b c".to_string()]
        );
        assert!(decode_string_list(None, "tags").unwrap().is_empty());
        assert!(decode_string_list(Some("not json".into()), "tags").is_err());
    }
}
