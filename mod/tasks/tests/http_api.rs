//! HTTP surface tests — drive the module router directly, no listener.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use taskhub_sql::SqliteStore;
use taskhub_tasks::api;
use taskhub_tasks::store::TaskStore;

fn test_router() -> Router {
    let db = Arc::new(SqliteStore::open_in_memory().unwrap());
    let store = Arc::new(TaskStore::new(db).unwrap());
    api::router(store)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn create_defaults_and_envelope() {
    let router = test_router();

    let (status, body) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "Buy milk"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["data"]["title"], "Buy milk");
    assert_eq!(body["data"]["completed"], false);
    assert_eq!(body["data"]["priority"], "medium");
    assert!(body["data"]["id"].as_str().unwrap().len() == 32);
}

#[tokio::test]
async fn create_rejects_blank_title() {
    let router = test_router();

    let (status, body) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_rejects_unknown_priority() {
    let router = test_router();

    let (status, body) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "x", "priority": "urgent"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn get_roundtrip_after_create() {
    let router = test_router();

    let (_, created) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "Water plants", "priority": "high"})),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&router, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // Equal to the created record, server-assigned fields included.
    assert_eq!(body["data"], created["data"]);
}

#[tokio::test]
async fn malformed_id_is_bad_request_not_404() {
    let router = test_router();

    for uri in ["/tasks/abc", "/tasks/zz-definitely-not-hex-zz"] {
        let (status, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid task id");
    }
}

#[tokio::test]
async fn missing_id_is_404_envelope() {
    let router = test_router();
    let ghost = taskhub_core::new_id();

    let (status, body) = send(&router, "GET", &format!("/tasks/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Task not found");

    let (status, _) = send(
        &router,
        "PUT",
        &format!("/tasks/{ghost}"),
        Some(serde_json::json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "DELETE", &format!("/tasks/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_merges_partial_body() {
    let router = test_router();

    let (_, created) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "Read book", "description": "chapter 3"})),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/tasks/{id}"),
        Some(serde_json::json!({"priority": "low"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["priority"], "low");
    // Untouched fields survive the merge.
    assert_eq!(body["data"]["title"], "Read book");
    assert_eq!(body["data"]["description"], "chapter 3");
}

#[tokio::test]
async fn full_crud_walk() {
    let router = test_router();

    // POST {title:"Buy milk"} → 201 with defaults.
    let (status, created) = send(
        &router,
        "POST",
        "/tasks",
        Some(serde_json::json!({"title": "Buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["completed"], false);
    assert_eq!(created["data"]["priority"], "medium");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // PUT {completed:true} → 200 with completed:true.
    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/tasks/{id}"),
        Some(serde_json::json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["completed"], true);

    // GET list → exactly that task, completed.
    let (status, listed) = send(&router, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["id"], id.as_str());
    assert_eq!(listed["data"][0]["completed"], true);

    // DELETE → 200 with the removed snapshot.
    let (status, deleted) = send(&router, "DELETE", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], id.as_str());

    // GET by id → 404.
    let (status, _) = send(&router, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
