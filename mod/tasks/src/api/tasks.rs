use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use taskhub_core::ServiceError;

use crate::model::{CreateTaskRequest, Task, UpdateTaskRequest, ensure_well_formed_id};
use crate::store::TaskStore;

type StoreState = Arc<TaskStore>;

pub fn router(store: Arc<TaskStore>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(store)
}

// ---------------------------------------------------------------------------
// GET /tasks
// ---------------------------------------------------------------------------

async fn list_tasks(
    State(store): State<StoreState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let tasks = store.list()?;
    Ok(Json(serde_json::json!({
        "success": true,
        "count": tasks.len(),
        "data": tasks,
    })))
}

// ---------------------------------------------------------------------------
// GET /tasks/:id
// ---------------------------------------------------------------------------

async fn get_task(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    ensure_well_formed_id(&id)?;
    let task = store.get(&id)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": task,
    })))
}

// ---------------------------------------------------------------------------
// POST /tasks
// ---------------------------------------------------------------------------

async fn create_task(
    State(store): State<StoreState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let task = Task::from_request(req)?;
    store.create(&task)?;
    tracing::debug!(id = %task.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Task created successfully",
            "data": task,
        })),
    ))
}

// ---------------------------------------------------------------------------
// PUT /tasks/:id
// ---------------------------------------------------------------------------

async fn update_task(
    State(store): State<StoreState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    ensure_well_formed_id(&id)?;
    let current = store.get(&id)?;
    let updated = current.apply_update(req)?;
    store.update(&updated)?;
    tracing::debug!(id = %id, "task updated");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Task updated successfully",
        "data": updated,
    })))
}

// ---------------------------------------------------------------------------
// DELETE /tasks/:id
// ---------------------------------------------------------------------------

async fn delete_task(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    ensure_well_formed_id(&id)?;
    let removed = store.delete(&id)?;
    tracing::debug!(id = %id, "task deleted");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Task deleted successfully",
        "data": removed,
    })))
}
