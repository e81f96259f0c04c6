//! Server-rendered todo page.
//!
//! `GET /` reads the list straight from the store (no HTTP round trip) and
//! renders it into `templates/index.html`, so the first paint needs no
//! client-side fetch. The same items are embedded as JSON in a `data-`
//! attribute for the page script to pick up.

use crate::server::state::AppState;
use axum::{extract::State, response::Html};
use tera::{Context, Tera};
use todo_core::todo::TodoItem;
use todo_web::{AppError, WebResult};

/// Template name of the todo page.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Compile the embedded templates.
///
/// Names ending in `.html` are auto-escaped.
///
/// # Errors
///
/// Returns an error if a template fails to parse.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(tera)
}

/// Build the template context for a list of todos.
///
/// # Errors
///
/// Returns an error if the todos cannot be serialized.
pub fn page_context(todos: &[TodoItem]) -> Result<Context, serde_json::Error> {
    let remaining = todos.iter().filter(|t| !t.completed).count();

    let mut context = Context::new();
    context.insert("todos", todos);
    context.insert("total", &todos.len());
    context.insert("remaining", &remaining);
    context.insert("initial_todos", &serde_json::to_string(todos)?);
    Ok(context)
}

/// Render the todo page with the current list.
pub async fn index(State(state): State<AppState>) -> WebResult<Html<String>> {
    let todos = state
        .store
        .list_all()
        .await
        .map_err(|e| AppError::internal("Failed to fetch todos").with_source(e.into()))?;

    let context = page_context(&todos)
        .map_err(|e| AppError::internal("Failed to render page").with_source(e.into()))?;

    let html = state
        .templates
        .render(INDEX_TEMPLATE, &context)
        .map_err(|e| AppError::internal("Failed to render page").with_source(e.into()))?;

    Ok(Html(html))
}
