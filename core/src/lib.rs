//! # Todo Core
//!
//! Domain types and storage traits for the todo application.
//!
//! This crate has no I/O of its own. It defines:
//!
//! - **`TodoItem`**: the single persisted entity (id, text, completion flag, creation time)
//! - **`NewTodo`**: validated input for creating an item
//! - **`TodoStore`**: the storage seam implemented by `todo-sqlite` and `todo-testing`
//! - **`Clock`**: injected time source, so stores assign `created_at` deterministically in tests
//!
//! ## Example
//!
//! ```no_run
//! use todo_core::store::{StoreError, TodoStore};
//! use todo_core::todo::NewTodo;
//!
//! async fn add<S: TodoStore + ?Sized>(store: &S) -> Result<(), StoreError> {
//!     let Ok(new_todo) = NewTodo::parse("  buy milk  ") else {
//!         return Ok(());
//!     };
//!     let created = store.create(new_todo).await?;
//!     assert_eq!(created.text, "buy milk");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod store;
pub mod todo;

pub use store::{StoreError, TodoStore};
pub use todo::{NewTodo, TodoId, TodoItem, ValidationError};

/// Environment module - injected dependencies
///
/// External effects that make tests non-deterministic live behind traits here
/// and are handed to stores at construction time.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time source used in production.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
