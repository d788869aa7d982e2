mod tasks;

use std::sync::Arc;

use axum::Router;

use crate::store::TaskStore;

/// Build the tasks module router.
///
/// Routes (nested under `/api` by the server binary):
/// - `GET    /tasks`       — list all tasks, newest first
/// - `POST   /tasks`       — create task
/// - `GET    /tasks/{id}`  — get one task
/// - `PUT    /tasks/{id}`  — partial update (merge semantics)
/// - `DELETE /tasks/{id}`  — delete task
pub fn router(store: Arc<TaskStore>) -> Router {
    tasks::router(store)
}
