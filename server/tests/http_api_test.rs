//! HTTP API integration tests.
//!
//! Drives the real router with `tower::ServiceExt::oneshot`. Each test gets
//! its own in-memory SQLite database, so tests are isolated and need no
//! running server.

#![allow(clippy::expect_used)] // Integration tests can use expect for setup
#![allow(clippy::unwrap_used)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use todo_server::{build_router, AppState};
use todo_sqlite::SqliteTodoStore;
use todo_testing::{stepping_test_clock, FailingTodoStore};
use todo_web::REQUEST_ID_HEADER;
use tower::ServiceExt;

async fn test_app() -> Router {
    let store = SqliteTodoStore::in_memory_with_clock(Arc::new(stepping_test_clock()))
        .await
        .expect("Failed to open in-memory database");
    build_router(AppState::new(Arc::new(store)).expect("Templates should compile"))
}

fn failing_app() -> Router {
    build_router(AppState::new(Arc::new(FailingTodoStore)).expect("Templates should compile"))
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).expect("Response should be JSON");
    (status, json)
}

async fn create(app: &Router, text: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/todos", Some(json!({ "text": text }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("List should be an array").clone()
}

#[tokio::test]
async fn test_create_todo() {
    let app = test_app().await;

    let body = create(&app, "buy milk").await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["text"], "buy milk");
    assert_eq!(body["completed"], false);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_trims_text() {
    let app = test_app().await;

    let body = create(&app, "   walk the dog \n").await;

    assert_eq!(body["text"], "walk the dog");
}

#[tokio::test]
async fn test_create_rejects_blank_text() {
    let app = test_app().await;

    for payload in [
        json!({ "text": "  " }),
        json!({ "text": "" }),
        json!({ "text": null }),
        json!({ "text": 42 }),
        json!({}),
    ] {
        let (status, body) = send(&app, "POST", "/api/todos", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Text is required" }));
    }

    assert!(list(&app).await.is_empty(), "Nothing should be persisted");
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = test_app().await;

    let (status, bytes) = send_raw(&app, "POST", "/api/todos", Body::from("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Invalid JSON body" }));
}

#[tokio::test]
async fn test_non_object_bodies_are_rejected() {
    let app = test_app().await;
    create(&app, "buy milk").await;

    for payload in [json!(["write docs"]), json!("write docs"), Value::Null] {
        let (status, body) = send(&app, "POST", "/api/todos", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid JSON body" }));
    }

    for payload in [json!([true]), json!(true), Value::Null] {
        let (status, body) = send(&app, "PATCH", "/api/todos/1", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid JSON body" }));
    }

    let todos = list(&app).await;
    assert_eq!(todos.len(), 1, "Nothing new should be persisted");
    assert_eq!(todos[0]["completed"], false);
}

#[tokio::test]
async fn test_update_completion() {
    let app = test_app().await;
    let created = create(&app, "buy milk").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/todos/1",
        Some(json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["text"], created["text"]);
    assert_eq!(body["created_at"], created["created_at"]);
    assert_eq!(body["completed"], true);

    let todos = list(&app).await;
    assert_eq!(todos[0]["completed"], true);
}

#[tokio::test]
async fn test_update_missing_todo_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/todos/999",
        Some(json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Todo not found" }));
}

#[tokio::test]
async fn test_update_requires_boolean() {
    let app = test_app().await;
    create(&app, "buy milk").await;

    for payload in [json!({}), json!({ "completed": "yes" }), json!({ "completed": 1 })] {
        let (status, body) = send(&app, "PATCH", "/api/todos/1", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Completed must be a boolean" }));
    }

    assert_eq!(list(&app).await[0]["completed"], false);
}

#[tokio::test]
async fn test_invalid_id() {
    let app = test_app().await;

    for uri in ["/api/todos/abc", "/api/todos/1.5", "/api/todos/12abc"] {
        let (status, body) = send(&app, "PATCH", uri, Some(json!({ "completed": true }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid ID" }));

        let (status, body) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid ID" }));
    }
}

#[tokio::test]
async fn test_delete_todo() {
    let app = test_app().await;
    create(&app, "buy milk").await;

    let (status, body) = send(&app, "DELETE", "/api/todos/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(list(&app).await.iter().all(|t| t["id"] != 1));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = test_app().await;
    create(&app, "keep me").await;
    create(&app, "delete me").await;

    for _ in 0..2 {
        let (status, body) = send(&app, "DELETE", "/api/todos/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    let (status, _) = send(&app, "DELETE", "/api/todos/999", None).await;
    assert_eq!(status, StatusCode::OK);

    let todos = list(&app).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["text"], "keep me");
}

#[tokio::test]
async fn test_list_newest_first_after_delete() {
    let app = test_app().await;
    for text in ["one", "two", "three", "four"] {
        create(&app, text).await;
    }

    send(&app, "DELETE", "/api/todos/2", None).await;

    let texts: Vec<_> = list(&app)
        .await
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["four", "three", "one"]);
}

#[tokio::test]
async fn test_storage_failures_are_internal_errors() {
    let app = failing_app();

    let cases = [
        ("GET", "/api/todos", None, "Failed to fetch todos"),
        (
            "POST",
            "/api/todos",
            Some(json!({ "text": "buy milk" })),
            "Failed to create todo",
        ),
        (
            "PATCH",
            "/api/todos/1",
            Some(json!({ "completed": true })),
            "Failed to update todo",
        ),
        ("DELETE", "/api/todos/1", None, "Failed to delete todo"),
    ];

    for (method, uri, payload, message) in cases {
        let (status, body) = send(&app, method, uri, payload).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let app = failing_app();

    let (status, _) = send(&app, "POST", "/api/todos", Some(json!({ "text": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/todos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_renders_current_todos() {
    let app = test_app().await;
    create(&app, "buy milk").await;
    create(&app, "write docs").await;
    send(&app, "PATCH", "/api/todos/1", Some(json!({ "completed": true }))).await;

    let (status, bytes) = send_raw(&app, "GET", "/", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("buy milk"));
    assert!(html.contains("write docs"));
    assert!(html.contains("1 of 2 remaining"));
    assert!(html.find("write docs") < html.find("buy milk"), "Newest first");
}

#[tokio::test]
async fn test_page_fails_with_storage() {
    let app = failing_app();

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch todos" }));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ready": true, "database": true }));

    let (status, _) = send(&failing_app(), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/todos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_valid_request_id_is_echoed() {
    let app = test_app().await;
    let request_id = "3f1c2b8e-6d4a-4e7b-9c0d-2a5e8f1b7c93";

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/todos")
                .header(REQUEST_ID_HEADER, request_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], request_id);
}
