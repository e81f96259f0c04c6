//! `SqliteTodoStore`: the `TodoStore` implementation over a sqlx `SqlitePool`.

use crate::DatabaseConfig;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::sync::Arc;
use todo_core::environment::{Clock, SystemClock};
use todo_core::store::{StoreError, StoreFuture, TodoStore};
use todo_core::todo::{NewTodo, TodoId, TodoItem};

const CREATE_TODOS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
";

/// Format written by `CURRENT_TIMESTAMP` for rows inserted outside this store.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite-backed todo store.
///
/// Cheap to clone: the pool is reference counted.
///
/// # Example
///
/// ```no_run
/// use todo_sqlite::SqliteTodoStore;
/// use todo_core::store::TodoStore;
/// use todo_core::todo::NewTodo;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteTodoStore::in_memory().await?;
/// let todo = store.create(NewTodo::parse("buy milk")?).await?;
/// assert!(!todo.completed);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SqliteTodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTodoStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl SqliteTodoStore {
    /// Open (creating if missing) the database file and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the file cannot be opened or the
    /// table cannot be created.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(database_error)?;

        tracing::info!(
            path = %config.path.display(),
            max_connections = config.max_connections,
            "Opened SQLite database"
        );

        let store = Self::from_pool(pool, Arc::new(SystemClock));
        store.migrate().await?;
        Ok(store)
    }

    /// Open a private in-memory database with the schema in place.
    ///
    /// Every call yields an independent database. The pool holds exactly one
    /// connection that never expires, since an in-memory database lives only
    /// as long as its connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the database cannot be created.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::in_memory_with_clock(Arc::new(SystemClock)).await
    }

    /// Like [`in_memory`](Self::in_memory), but timestamps come from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the database cannot be created.
    pub async fn in_memory_with_clock(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .map_err(database_error)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(database_error)?;

        let store = Self::from_pool(pool, clock);
        store.migrate().await?;
        Ok(store)
    }

    /// Wrap an existing pool. The schema is not touched; call
    /// [`migrate`](Self::migrate) if needed.
    #[must_use]
    pub fn from_pool(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Create the `todos` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TODOS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, text, completed, created_at
            FROM todos
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_todo).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_one(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        let row = sqlx::query("SELECT id, text, completed, created_at FROM todos WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(row_to_todo).transpose()
    }

    #[tracing::instrument(skip(self, new_todo))]
    async fn insert(&self, new_todo: NewTodo) -> Result<TodoItem, StoreError> {
        let created_at = self.clock.now();

        let row = sqlx::query(
            r"
            INSERT INTO todos (text, completed, created_at)
            VALUES (?, 0, ?)
            RETURNING id, text, completed, created_at
            ",
        )
        .bind(new_todo.into_text())
        .bind(format_timestamp(created_at))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let todo = row_to_todo(&row)?;
        tracing::debug!(id = %todo.id, "Todo created");
        Ok(todo)
    }

    #[tracing::instrument(skip(self))]
    async fn set_completed(
        &self,
        id: TodoId,
        completed: bool,
    ) -> Result<Option<TodoItem>, StoreError> {
        let row = sqlx::query(
            r"
            UPDATE todos
            SET completed = ?
            WHERE id = ?
            RETURNING id, text, completed, created_at
            ",
        )
        .bind(completed)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(row_to_todo).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: TodoId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        tracing::debug!(rows_affected = result.rows_affected(), "Todo delete executed");
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }
}

impl TodoStore for SqliteTodoStore {
    fn list_all(&self) -> StoreFuture<'_, Vec<TodoItem>> {
        Box::pin(self.fetch_all())
    }

    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<TodoItem>> {
        Box::pin(self.fetch_one(id))
    }

    fn create(&self, new_todo: NewTodo) -> StoreFuture<'_, TodoItem> {
        Box::pin(self.insert(new_todo))
    }

    fn update_completion(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<TodoItem>> {
        Box::pin(self.set_completed(id, completed))
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, ()> {
        Box::pin(self.remove(id))
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(self.check_connection())
    }
}

#[allow(clippy::needless_pass_by_value)] // Used as `map_err(database_error)`
fn database_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Fixed-width RFC 3339 in UTC, so text ordering matches time ordering.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Serialization(format!("invalid created_at {raw:?}: {e}")))
}

fn row_to_todo(row: &SqliteRow) -> Result<TodoItem, StoreError> {
    let id: i64 = row.try_get("id").map_err(database_error)?;
    let text: String = row.try_get("text").map_err(database_error)?;
    let completed: bool = row.try_get("completed").map_err(database_error)?;
    let created_at: String = row.try_get("created_at").map_err(database_error)?;

    Ok(TodoItem {
        id: TodoId::new(id),
        text,
        completed,
        created_at: parse_timestamp(&created_at)?,
    })
}
