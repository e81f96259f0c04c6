//! In-memory todo store testing utilities
//!
//! - [`InMemoryTodoStore`]: `Vec`-backed store with the same ordering and
//!   id rules as the SQLite store
//! - [`FailingTodoStore`]: every operation returns a database error

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use std::future::ready;
use std::sync::{Arc, RwLock};
use todo_core::environment::{Clock, SystemClock};
use todo_core::store::{StoreError, StoreFuture, TodoStore};
use todo_core::todo::{NewTodo, TodoId, TodoItem};

#[derive(Debug, Default)]
struct Inner {
    todos: Vec<TodoItem>,
    last_id: i64,
}

/// In-memory todo store for fast, deterministic testing.
///
/// Ids start at 1 and are never reused, even after deletes.
///
/// # Example
///
/// ```
/// use todo_testing::InMemoryTodoStore;
/// use todo_core::store::TodoStore;
/// use todo_core::todo::NewTodo;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
/// let todo = store.create(NewTodo::parse("write tests")?).await?;
/// store.delete(todo.id).await?;
/// assert!(store.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InMemoryTodoStore {
    inner: Arc<RwLock<Inner>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTodoStore {
    /// Create an empty store using the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store whose timestamps come from `clock`
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            clock,
        }
    }

    /// Number of stored todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().todos.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().todos.is_empty()
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl TodoStore for InMemoryTodoStore {
    fn list_all(&self) -> StoreFuture<'_, Vec<TodoItem>> {
        let mut todos = self.inner.read().unwrap().todos.clone();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Box::pin(ready(Ok(todos)))
    }

    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<TodoItem>> {
        let todo = self
            .inner
            .read()
            .unwrap()
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned();
        Box::pin(ready(Ok(todo)))
    }

    fn create(&self, new_todo: NewTodo) -> StoreFuture<'_, TodoItem> {
        let created_at = self.clock.now();
        let mut inner = self.inner.write().unwrap();
        inner.last_id += 1;
        let todo = TodoItem {
            id: TodoId::new(inner.last_id),
            text: new_todo.into_text(),
            completed: false,
            created_at,
        };
        inner.todos.push(todo.clone());
        Box::pin(ready(Ok(todo)))
    }

    fn update_completion(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<TodoItem>> {
        let updated = self
            .inner
            .write()
            .unwrap()
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .map(|todo| {
                todo.completed = completed;
                todo.clone()
            });
        Box::pin(ready(Ok(updated)))
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, ()> {
        self.inner.write().unwrap().todos.retain(|t| t.id != id);
        Box::pin(ready(Ok(())))
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(ready(Ok(())))
    }
}

/// Store whose every operation fails with [`StoreError::Database`].
///
/// Used to exercise 500 paths in handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTodoStore;

impl FailingTodoStore {
    fn fail<T: Send + 'static>() -> StoreFuture<'static, T> {
        Box::pin(ready(Err(StoreError::Database(
            "simulated storage failure".to_string(),
        ))))
    }
}

impl TodoStore for FailingTodoStore {
    fn list_all(&self) -> StoreFuture<'_, Vec<TodoItem>> {
        Self::fail()
    }

    fn get(&self, _id: TodoId) -> StoreFuture<'_, Option<TodoItem>> {
        Self::fail()
    }

    fn create(&self, _new_todo: NewTodo) -> StoreFuture<'_, TodoItem> {
        Self::fail()
    }

    fn update_completion(&self, _id: TodoId, _completed: bool) -> StoreFuture<'_, Option<TodoItem>> {
        Self::fail()
    }

    fn delete(&self, _id: TodoId) -> StoreFuture<'_, ()> {
        Self::fail()
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Self::fail()
    }
}
