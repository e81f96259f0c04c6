//! SQLite todo store for the todo application.
//!
//! This crate provides the production implementation of the `TodoStore` trait
//! from `todo-core`. It keeps every item in a single `todos` table inside an
//! embedded SQLite file and supports:
//!
//! - Creating the table on first startup
//! - Single-statement writes (`INSERT/UPDATE ... RETURNING`)
//! - Connection pooling via sqlx
//! - Isolated in-memory databases for tests
//!
//! # Example
//!
//! ```no_run
//! use todo_sqlite::{DatabaseConfig, SqliteTodoStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteTodoStore::connect(&DatabaseConfig::default()).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod store;

pub use store::SqliteTodoStore;

/// Default database file, relative to the process working directory.
pub const DEFAULT_DATABASE_PATH: &str = "todos.db";

/// SQLite connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the database file (created if missing)
    pub path: PathBuf,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 5,
        }
    }
}
