//! Axum web framework integration for the todo application.
//!
//! This crate holds the HTTP plumbing that is independent of the todo routes
//! themselves:
//!
//! - [`AppError`]: maps failures to `{"error": "..."}` JSON responses
//! - [`request_id_layer`]: per-request IDs echoed in `x-request-id`
//! - [`request_span`]: `TraceLayer` span carrying the request ID
//! - [`RequestId`]: extractor for the current request's ID
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives; the middleware assigns a request ID
//! 2. **Extract data** from the request (path, JSON)
//! 3. **Call the store** injected through application state
//! 4. **Map result** to an HTTP response, or to an `AppError`
//!
//! # Example
//!
//! ```ignore
//! use todo_web::{request_id_layer, AppError};
//! use axum::{Router, routing::get, Json};
//!
//! async fn list(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, AppError> {
//!     let todos = state.store.list_all().await
//!         .map_err(|e| AppError::internal("Failed to fetch todos").with_source(e.into()))?;
//!     Ok(Json(todos))
//! }
//!
//! let app = Router::new()
//!     .route("/api/todos", get(list))
//!     .layer(request_id_layer())
//!     .with_state(app_state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::RequestId;
pub use middleware::{request_id_layer, request_span, REQUEST_ID_HEADER};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
