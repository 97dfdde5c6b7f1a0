//! # Shopping List Testing
//!
//! Testing utilities and helpers for the shopping list state architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - An in-memory persistence primitive with failure injection
//! - A Given/When/Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use shopping_list_testing::{test_clock, InMemoryStorage, SequentialIdGenerator};
//!
//! #[tokio::test]
//! async fn adds_items() {
//!     let storage = InMemoryStorage::new();
//!     let env = ListEnvironment::new(
//!         Arc::new(storage.clone()),
//!         Arc::new(test_clock()),
//!         Arc::new(SequentialIdGenerator::new()),
//!     );
//!     let store = ListStore::open(env).await?;
//!     store.add_item("Milk").await?;
//!     assert_eq!(store.snapshot().await.items.len(), 1);
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use shopping_list_core::environment::{Clock, IdGenerator};

mod storage_mocks;

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Duration, IdGenerator, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Returns the same time until advanced, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use shopping_list_testing::mocks::FixedClock;
    /// use shopping_list_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug)]
    pub struct FixedClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(time),
            }
        }

        /// Move the clock forward
        #[allow(clippy::unwrap_used)] // Poisoned only if a test already panicked
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap();
            *time += by;
        }
    }

    impl Clock for FixedClock {
        #[allow(clippy::unwrap_used)] // Poisoned only if a test already panicked
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap()
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

    /// Predictable identifiers: `item-1`, `item-2`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting from 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("item-{n}")
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
pub use storage_mocks::InMemoryStorage;
