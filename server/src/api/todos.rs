//! Todo API endpoints.
//!
//! - GET    /api/todos      - List all todos, newest first
//! - POST   /api/todos      - Create a todo
//! - PATCH  /api/todos/:id  - Set a todo's completion flag
//! - DELETE /api/todos/:id  - Delete a todo (idempotent)
//!
//! Bodies are read as raw bytes and decoded here, so a missing
//! `Content-Type` header is not an error and every rejection uses the
//! `{"error": "..."}` shape.

use crate::server::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use todo_core::todo::{NewTodo, TodoId, TodoItem};
use todo_web::{AppError, RequestId, WebResult};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a todo.
///
/// `text` is kept untyped so that a missing, `null`, or non-string value is
/// reported as "Text is required" rather than as a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Todo text (must be a non-blank string)
    #[serde(default)]
    pub text: Option<Value>,
}

/// Request to update a todo's completion flag.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New completion flag (must be a JSON boolean)
    #[serde(default)]
    pub completed: Option<Value>,
}

/// Response after deleting a todo.
#[derive(Debug, Serialize)]
pub struct DeleteTodoResponse {
    /// Always `true`
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// List all todos, newest first.
///
/// ```bash
/// curl http://localhost:3000/api/todos
/// ```
pub async fn list_todos(State(state): State<AppState>) -> WebResult<Json<Vec<TodoItem>>> {
    let todos = state
        .store
        .list_all()
        .await
        .map_err(|e| AppError::internal("Failed to fetch todos").with_source(e.into()))?;

    Ok(Json(todos))
}

/// Create a todo.
///
/// ```bash
/// curl -X POST http://localhost:3000/api/todos \
///   -H "Content-Type: application/json" \
///   -d '{"text": "buy milk"}'
/// ```
pub async fn create_todo(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> WebResult<(StatusCode, Json<TodoItem>)> {
    let request: CreateTodoRequest = decode_body(&body)?;

    let new_todo = match request.text {
        Some(Value::String(text)) => NewTodo::parse(&text).ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::bad_request("Text is required"))?;

    let todo = state
        .store
        .create(new_todo)
        .await
        .map_err(|e| AppError::internal("Failed to create todo").with_source(e.into()))?;

    metrics::counter!("todos.created").increment(1);
    tracing::info!(request_id = %request_id, id = %todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Set a todo's completion flag.
///
/// ```bash
/// curl -X PATCH http://localhost:3000/api/todos/1 \
///   -H "Content-Type: application/json" \
///   -d '{"completed": true}'
/// ```
pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    request_id: RequestId,
    body: Bytes,
) -> WebResult<Json<TodoItem>> {
    let id = parse_id(&raw_id)?;
    let request: UpdateTodoRequest = decode_body(&body)?;

    let Some(Value::Bool(completed)) = request.completed else {
        return Err(AppError::bad_request("Completed must be a boolean"));
    };

    let todo = state
        .store
        .update_completion(id, completed)
        .await
        .map_err(|e| AppError::internal("Failed to update todo").with_source(e.into()))?
        .ok_or_else(|| AppError::not_found("Todo not found"))?;

    metrics::counter!("todos.updated").increment(1);
    tracing::info!(request_id = %request_id, id = %id, completed, "Todo updated");

    Ok(Json(todo))
}

/// Delete a todo. Deleting a missing id still succeeds.
///
/// ```bash
/// curl -X DELETE http://localhost:3000/api/todos/1
/// ```
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    request_id: RequestId,
) -> WebResult<Json<DeleteTodoResponse>> {
    let id = parse_id(&raw_id)?;

    state
        .store
        .delete(id)
        .await
        .map_err(|e| AppError::internal("Failed to delete todo").with_source(e.into()))?;

    metrics::counter!("todos.deleted").increment(1);
    tracing::info!(request_id = %request_id, id = %id, "Todo deleted");

    Ok(Json(DeleteTodoResponse { success: true }))
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_id(raw: &str) -> WebResult<TodoId> {
    raw.parse().map_err(|_| AppError::bad_request("Invalid ID"))
}

/// Decode a request body that must be a JSON object.
///
/// Arrays, scalars and `null` are rejected up front: serde would otherwise
/// map a sequence onto the request struct's fields by position.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> WebResult<T> {
    let fields: Map<String, Value> = match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            tracing::debug!(body = %other, "Rejected non-object request body");
            return Err(invalid_body());
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected request body");
            return Err(invalid_body());
        }
    };

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        invalid_body()
    })
}

fn invalid_body() -> AppError {
    AppError::bad_request("Invalid JSON body")
}
