//! Package repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist packages and their parent links.
//! - Own the cascading delete that removes a package with its contents.
//!
//! # Invariants
//! - Listing order is `created_at DESC, id ASC`.
//! - `delete_with_contents` is all-or-nothing: tasks, notes and the package
//!   row go together; child packages are detached, never deleted.

use super::{RepoError, RepoResult};
use crate::model::package::{Package, PackageStatus};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub(crate) const PACKAGE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    parent_id,
    due_at,
    status,
    created_at,
    updated_at
FROM packages";

/// Equality filters for package listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    pub status: Option<PackageStatus>,
    pub parent_id: Option<EntityId>,
}

/// Row counts removed or touched by a cascading package delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub tasks_deleted: usize,
    pub notes_deleted: usize,
    pub packages_detached: usize,
}

/// Repository interface for package operations.
pub trait PackageRepository {
    fn create_package(&self, package: &Package) -> RepoResult<EntityId>;
    fn get_package(&self, id: &str) -> RepoResult<Option<Package>>;
    fn update_package(&self, package: &Package) -> RepoResult<()>;
    /// Deletes only the package row.
    fn delete_package(&self, id: &str) -> RepoResult<bool>;
    fn list_packages(&self, filter: &PackageFilter) -> RepoResult<Vec<Package>>;
    /// Deletes the package plus its tasks and notes in one transaction.
    ///
    /// Returns `None` when the package does not exist; nothing is touched.
    fn delete_with_contents(&self, id: &str) -> RepoResult<Option<CascadeSummary>>;
}

/// SQLite-backed package repository.
pub struct SqlitePackageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePackageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PackageRepository for SqlitePackageRepository<'_> {
    fn create_package(&self, package: &Package) -> RepoResult<EntityId> {
        package.validate()?;

        self.conn.execute(
            "INSERT INTO packages (
                id,
                name,
                description,
                parent_id,
                due_at,
                status,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                package.id.as_str(),
                package.name.as_str(),
                package.description.as_deref(),
                package.parent_id.as_deref(),
                package.due_at,
                package.status.as_str(),
                package.created_at,
                package.updated_at,
            ],
        )?;

        Ok(package.id.clone())
    }

    fn get_package(&self, id: &str) -> RepoResult<Option<Package>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PACKAGE_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_package_row(row)))
            .optional()?;
        row.transpose()
    }

    fn update_package(&self, package: &Package) -> RepoResult<()> {
        package.validate()?;

        let changed = self.conn.execute(
            "UPDATE packages
             SET
                name = ?1,
                description = ?2,
                parent_id = ?3,
                due_at = ?4,
                status = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                package.name.as_str(),
                package.description.as_deref(),
                package.parent_id.as_deref(),
                package.due_at,
                package.status.as_str(),
                package.updated_at,
                package.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(package.id.clone()));
        }
        Ok(())
    }

    fn delete_package(&self, id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM packages WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_packages(&self, filter: &PackageFilter) -> RepoResult<Vec<Package>> {
        let mut sql = format!("{PACKAGE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(parent_id) = filter.parent_id.as_ref() {
            sql.push_str(" AND parent_id = ?");
            bind_values.push(Value::Text(parent_id.clone()));
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut packages = Vec::new();
        while let Some(row) = rows.next()? {
            packages.push(parse_package_row(row)?);
        }
        Ok(packages)
    }

    fn delete_with_contents(&self, id: &str) -> RepoResult<Option<CascadeSummary>> {
        // The repository only holds a shared borrow, so the transaction is
        // opened unchecked; nothing else uses this connection meanwhile.
        let tx = self.conn.unchecked_transaction()?;

        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM packages WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Ok(None);
        }

        let tasks_deleted = tx.execute("DELETE FROM tasks WHERE package_id = ?1;", [id])?;
        let notes_deleted = tx.execute("DELETE FROM notes WHERE package_id = ?1;", [id])?;
        let packages_detached = tx.execute(
            "UPDATE packages SET parent_id = NULL WHERE parent_id = ?1;",
            [id],
        )?;
        tx.execute("DELETE FROM packages WHERE id = ?1;", [id])?;
        tx.commit()?;

        Ok(Some(CascadeSummary {
            tasks_deleted,
            notes_deleted,
            packages_detached,
        }))
    }
}

pub(crate) fn parse_package_row(row: &Row<'_>) -> RepoResult<Package> {
    let status_text: String = row.get("status")?;
    let status = PackageStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid package status `{status_text}` in packages.status"
        ))
    })?;

    Ok(Package {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        parent_id: row.get("parent_id")?,
        due_at: row.get("due_at")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
