//! Domain types for todo items.
//!
//! A todo list is a flat collection of items. Each item is created with some
//! text, can be toggled between open and completed, and can be deleted. The
//! storage layer assigns `id` and `created_at`; only `completed` ever changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item.
///
/// Assigned by storage on creation and never reused. Serializes as a bare
/// integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing (never empty)
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

/// Validation failures for todo input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text was missing, empty, or only whitespace.
    #[error("Text is required")]
    EmptyText,
}

/// Validated input for creating a todo.
///
/// The text is trimmed and guaranteed non-empty, so a store handed a
/// `NewTodo` never has to re-check it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    text: String,
}

impl NewTodo {
    /// Trims `text` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyText`] if the text is empty after
    /// trimming.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    /// The trimmed text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the input, returning the trimmed text
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}
