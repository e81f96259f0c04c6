//! Router configuration for the todo server.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::todos;
use crate::page;
use axum::{
    routing::{get, patch},
    Router,
};
use todo_web::{request_id_layer, request_span};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /` - server-rendered page
/// - `GET /health`, `GET /ready` - health checks
/// - `GET|POST /api/todos` - collection route
/// - `PATCH|DELETE /api/todos/:id` - item route
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/:id",
            patch(todos::update_todo).delete(todos::delete_todo),
        );

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(request_id_layer())
        .with_state(state)
}
