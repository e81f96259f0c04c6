//! # Todo Testing
//!
//! Test doubles for the todo application.
//!
//! This crate provides:
//! - Deterministic [`Clock`](todo_core::environment::Clock) implementations
//! - [`InMemoryTodoStore`]: a `Vec`-backed `TodoStore` for handler tests
//! - [`FailingTodoStore`]: a `TodoStore` whose every operation fails
//!
//! ## Example
//!
//! ```
//! use todo_testing::{InMemoryTodoStore, test_clock};
//! use todo_core::store::TodoStore;
//! use todo_core::todo::NewTodo;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryTodoStore::with_clock(Arc::new(test_clock()));
//! let todo = store.create(NewTodo::parse("buy milk")?).await?;
//! assert_eq!(todo.id.as_i64(), 1);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::Clock;

mod store_mocks;

pub use store_mocks::{FailingTodoStore, InMemoryTodoStore};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that moves forward by `step` on every read.
    ///
    /// Gives each created todo a distinct `created_at`, so ordering tests do
    /// not depend on wall-clock resolution.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Start at `start`, advancing by `step` after each read
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = match self.next.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Stepping clock starting at the [`test_clock`] time, one second per read.
    #[must_use]
    pub fn stepping_test_clock() -> SteppingClock {
        SteppingClock::new(test_clock().now(), Duration::seconds(1))
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SteppingClock, stepping_test_clock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_stepping_clock_advances() {
        let clock = stepping_test_clock();
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first, test_clock().now());
        assert_eq!(second - first, chrono::Duration::seconds(1));
    }
}
