//! Cross-kind text search.
//!
//! # Responsibility
//! - Match a query against tasks, notes and packages in one call.
//! - Keep result shaping inside core so shell, CLI and API agree.

pub mod substring;

pub use substring::{search_all, SearchResults};
