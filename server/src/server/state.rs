//! Application state for the todo HTTP server.
//!
//! Contains the shared resources every handler needs:
//! - The todo store (the only owner of persisted items)
//! - Compiled page templates

use crate::page;
use std::sync::Arc;
use tera::Tera;
use todo_core::store::TodoStore;

/// Application state shared across all HTTP handlers.
///
/// Built once at startup and cloned (cheaply, via `Arc`) for each request.
/// Tests build one per test around an isolated store.
#[derive(Clone)]
pub struct AppState {
    /// Todo storage
    pub store: Arc<dyn TodoStore>,

    /// Compiled page templates
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Create application state around `store`, compiling the page templates.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to parse.
    pub fn new(store: Arc<dyn TodoStore>) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            templates: Arc::new(page::load_templates()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
