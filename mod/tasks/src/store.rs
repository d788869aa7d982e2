use std::sync::Arc;

use taskhub_core::ServiceError;
use taskhub_sql::{Row, SQLStore, Value};

use crate::model::Task;

/// SQL schema for the tasks table.
///
/// The full record lives in the JSON `data` column; `completed`, `priority`
/// and `create_at` are mirrored into indexed columns.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id          TEXT PRIMARY KEY,
    data        TEXT NOT NULL,
    completed   INTEGER NOT NULL DEFAULT 0,
    priority    TEXT NOT NULL,
    create_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);
CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority);
CREATE INDEX IF NOT EXISTS idx_tasks_create_at ON tasks(create_at);
";

/// Persistent storage for tasks, backed by SQLStore (SQLite).
pub struct TaskStore {
    db: Arc<dyn SQLStore>,
}

impl TaskStore {
    /// Create a new TaskStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        db.exec_batch(SCHEMA)
            .map_err(|e| ServiceError::Storage(format!("tasks schema init: {e}")))?;
        Ok(Self { db })
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new task.
    pub fn create(&self, task: &Task) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(task).map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO tasks (id, data, completed, priority, create_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(task.id.clone()),
                    Value::Text(data),
                    Value::Integer(task.completed as i64),
                    Value::Text(task.priority.as_str().to_string()),
                    Value::Text(task.created_at.clone()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Get a task by ID.
    pub fn get(&self, id: &str) -> Result<Task, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM tasks WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("task '{id}' does not exist")))?;

        row_to_task(row)
    }

    /// Update a task (full replacement of the data column + indexed columns).
    pub fn update(&self, task: &Task) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(task).map_err(|e| ServiceError::Internal(e.to_string()))?;

        let affected = self
            .db
            .exec(
                "UPDATE tasks SET data = ?1, completed = ?2, priority = ?3 WHERE id = ?4",
                &[
                    Value::Text(data),
                    Value::Integer(task.completed as i64),
                    Value::Text(task.priority.as_str().to_string()),
                    Value::Text(task.id.clone()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "task '{}' does not exist",
                task.id
            )));
        }
        Ok(())
    }

    /// Delete a task by ID, returning the removed record's snapshot.
    pub fn delete(&self, id: &str) -> Result<Task, ServiceError> {
        let snapshot = self.get(id)?;

        let affected = self
            .db
            .exec(
                "DELETE FROM tasks WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            // Raced with a concurrent delete; the loser sees not-found.
            return Err(ServiceError::NotFound(format!("task '{id}' does not exist")));
        }
        Ok(snapshot)
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    /// List every task, newest first. No filtering, no pagination.
    pub fn list(&self) -> Result<Vec<Task>, ServiceError> {
        let rows = self
            .db
            .query("SELECT data FROM tasks ORDER BY create_at DESC", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_task).collect()
    }

    /// Total number of stored tasks.
    pub fn count(&self) -> Result<usize, ServiceError> {
        let rows = self
            .db
            .query("SELECT COUNT(*) as cnt FROM tasks", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize)
    }
}

/// Deserialize a Task from a row's `data` JSON column.
fn row_to_task(row: &Row) -> Result<Task, ServiceError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json).map_err(|e| ServiceError::Storage(format!("bad task json: {e}")))
}
