//! Route registration — collects module routes + system endpoints.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the complete router with all routes.
///
/// Module routes are merged and nested under `/api`; anything unmatched
/// falls through to the 404 envelope.
pub fn build_router(module_routes: Vec<(&str, Router)>) -> Router {
    let mut api = Router::new();
    for (name, router) in module_routes {
        info!("Mounting {} module under /api", name);
        api = api.merge(router);
    }

    // The UI is served from another origin; allow all of them.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", api)
        .fallback(not_found)
        .layer(cors)
}

/// Service descriptor: name, version, endpoint map.
async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "TaskHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list":   "GET /api/tasks",
            "get":    "GET /api/tasks/{id}",
            "create": "POST /api/tasks",
            "update": "PUT /api/tasks/{id}",
            "delete": "DELETE /api/tasks/{id}",
            "health": "GET /health",
        },
    }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "taskhubd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 404 envelope for any unmatched route or method.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": "Route not found",
            "error": "no such endpoint",
        })),
    )
}
