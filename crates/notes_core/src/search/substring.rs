//! Case-insensitive substring search over the three record kinds.
//!
//! # Invariants
//! - Blank queries return empty results without touching the database.
//! - `%`, `_` and `\` in the query match literally.
//! - Each kind is ordered by `updated_at DESC, id ASC`.
//! - Case folding is SQLite `LIKE` folding (ASCII only).

use crate::model::note::Note;
use crate::model::package::Package;
use crate::model::task::Task;
use crate::repo::note_repo::{parse_note_row, NOTE_SELECT_SQL};
use crate::repo::package_repo::{parse_package_row, PACKAGE_SELECT_SQL};
use crate::repo::task_repo::{parse_task_row, TASK_SELECT_SQL};
use crate::repo::{contains_pattern, RepoResult};
use log::debug;
use rusqlite::{Connection, Row};
use serde::Serialize;

/// Matches grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub packages: Vec<Package>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.tasks.len() + self.notes.len() + self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Searches title+description (tasks), title+content (notes) and
/// name+description (packages).
pub fn search_all(conn: &Connection, query: &str) -> RepoResult<SearchResults> {
    let needle = query.trim();
    if needle.is_empty() {
        return Ok(SearchResults::default());
    }
    let pattern = contains_pattern(needle);

    let results = SearchResults {
        tasks: query_kind(
            conn,
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE title LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'
                 ORDER BY updated_at DESC, id ASC;"
            ),
            &pattern,
            parse_task_row,
        )?,
        notes: query_kind(
            conn,
            &format!(
                "{NOTE_SELECT_SQL}
                 WHERE title LIKE ?1 ESCAPE '\\'
                    OR content LIKE ?1 ESCAPE '\\'
                 ORDER BY updated_at DESC, id ASC;"
            ),
            &pattern,
            parse_note_row,
        )?,
        packages: query_kind(
            conn,
            &format!(
                "{PACKAGE_SELECT_SQL}
                 WHERE name LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'
                 ORDER BY updated_at DESC, id ASC;"
            ),
            &pattern,
            parse_package_row,
        )?,
    };

    debug!(
        "event=search module=search status=ok tasks={} notes={} packages={}",
        results.tasks.len(),
        results.notes.len(),
        results.packages.len()
    );
    Ok(results)
}

fn query_kind<T>(
    conn: &Connection,
    sql: &str,
    pattern: &str,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([pattern])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}
