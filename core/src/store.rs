//! Todo store trait and related types.
//!
//! This module defines the storage seam of the application: a single table of
//! todo items with list, create, update-completion, and delete operations.
//!
//! # Implementations
//!
//! - `SqliteTodoStore` (in `todo-sqlite`): embedded SQLite file, used in production
//! - `InMemoryTodoStore` (in `todo-testing`): `Vec`-backed, for handler tests
//!
//! # Example
//!
//! ```no_run
//! use todo_core::store::{StoreError, TodoStore};
//! use todo_core::todo::TodoId;
//!
//! async fn toggle<S: TodoStore + ?Sized>(store: &S, id: TodoId) -> Result<bool, StoreError> {
//!     let updated = store.update_completion(id, true).await?;
//!     Ok(updated.is_some())
//! }
//! ```

use crate::todo::{NewTodo, TodoId, TodoItem};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`TodoStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during store operations.
///
/// Not-found is not an error: lookups and updates return `Option`, and
/// deletes are idempotent.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be decoded into a `TodoItem`.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage abstraction for todo items.
///
/// # Ordering
///
/// [`list_all`](TodoStore::list_all) returns items newest first (by
/// `created_at`, ties broken by descending id).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is created at startup
/// and shared by every request.
///
/// # Dyn Compatibility
///
/// Methods return boxed futures instead of `async fn` so the application can
/// hold an `Arc<dyn TodoStore>`.
pub trait TodoStore: Send + Sync {
    /// Return every todo, newest first. Empty when there are none.
    ///
    /// # Errors
    ///
    /// - `Database`: query failed
    fn list_all(&self) -> StoreFuture<'_, Vec<TodoItem>>;

    /// Look up a single todo by id.
    ///
    /// # Errors
    ///
    /// - `Database`: query failed
    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<TodoItem>>;

    /// Insert a new todo and return it fully populated.
    ///
    /// The store assigns a fresh id and the current time; `completed` starts
    /// as `false`.
    ///
    /// # Errors
    ///
    /// - `Database`: insert failed
    fn create(&self, new_todo: NewTodo) -> StoreFuture<'_, TodoItem>;

    /// Set the completion flag of an existing todo.
    ///
    /// Returns `None` when no todo has this id; nothing is written in that
    /// case. `text` and `created_at` are never touched.
    ///
    /// # Errors
    ///
    /// - `Database`: update failed
    fn update_completion(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<TodoItem>>;

    /// Delete a todo. Deleting an id that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// - `Database`: delete failed
    fn delete(&self, id: TodoId) -> StoreFuture<'_, ()>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// - `Database`: storage is unavailable
    fn ping(&self) -> StoreFuture<'_, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::Database("disk I/O error".to_string());
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }

    #[test]
    fn store_is_dyn_compatible() {
        fn assert_dyn(_: Option<&dyn TodoStore>) {}
        assert_dyn(None);
    }
}
