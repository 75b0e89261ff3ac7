//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is `created_at DESC, id ASC`.
//! - `tags` is persisted as a JSON array column.

use super::{decode_string_list, encode_string_list, RepoError, RepoResult};
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub(crate) const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    priority,
    due_at,
    package_id,
    tags,
    created_at,
    updated_at,
    completed_at
FROM tasks";

/// Equality filters for task listing. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub package_id: Option<EntityId>,
}

impl TaskFilter {
    pub fn in_package(package_id: impl Into<EntityId>) -> Self {
        Self {
            package_id: Some(package_id.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<EntityId>;
    fn get_task(&self, id: &str) -> RepoResult<Option<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Returns whether a row was deleted.
    fn delete_task(&self, id: &str) -> RepoResult<bool>;
    fn list_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<EntityId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                priority,
                due_at,
                package_id,
                tags,
                created_at,
                updated_at,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_deref(),
                task.status.as_str(),
                task.priority.as_str(),
                task.due_at,
                task.package_id.as_deref(),
                encode_string_list(&task.tags)?,
                task.created_at,
                task.updated_at,
                task.completed_at,
            ],
        )?;

        Ok(task.id.clone())
    }

    fn get_task(&self, id: &str) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt.query_row([id], |row| Ok(parse_task_row(row))).optional()?;
        row.transpose()
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                status = ?3,
                priority = ?4,
                due_at = ?5,
                package_id = ?6,
                tags = ?7,
                updated_at = ?8,
                completed_at = ?9
             WHERE id = ?10;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                task.status.as_str(),
                task.priority.as_str(),
                task.due_at,
                task.package_id.as_deref(),
                encode_string_list(&task.tags)?,
                task.updated_at,
                task.completed_at,
                task.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id.clone()));
        }
        Ok(())
    }

    fn delete_task(&self, id: &str) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(priority) = filter.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(Value::Text(priority.as_str().to_string()));
        }
        if let Some(package_id) = filter.package_id.as_ref() {
            sql.push_str(" AND package_id = ?");
            bind_values.push(Value::Text(package_id.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

pub(crate) fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    let status = TaskStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid task priority `{priority_text}` in tasks.priority"
        ))
    })?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        priority,
        due_at: row.get("due_at")?,
        package_id: row.get("package_id")?,
        tags: decode_string_list(row.get("tags")?, "tasks.tags")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        completed_at: row.get("completed_at")?,
    })
}
