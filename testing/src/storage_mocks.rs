//! In-memory persistence primitive for fast, deterministic tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a test panic

use shopping_list_core::storage::{KeyValueStorage, StorageError, StorageFuture};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, String>,
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// `HashMap`-backed [`KeyValueStorage`] with failure injection.
///
/// Clones share the same records, so a test can keep one handle for
/// assertions and hand another to the environment.
///
/// # Example
///
/// ```
/// use shopping_list_testing::InMemoryStorage;
/// use shopping_list_core::storage::KeyValueStorage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = InMemoryStorage::new();
/// storage.set("shoppingList", "[]".to_string()).await?;
///
/// assert_eq!(storage.record("shoppingList").as_deref(), Some("[]"));
/// assert_eq!(storage.write_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`
    ///
    /// Seeding does not count as a write.
    #[must_use]
    pub fn with_record(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .inner
            .lock()
            .unwrap()
            .records
            .insert(key.to_string(), value.into());
        storage
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    /// Make every subsequent `set` fail
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Current record under `key`
    #[must_use]
    pub fn record(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().records.get(key).cloned()
    }

    /// Number of successful writes
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().writes.len()
    }

    /// Every successful write as `(key, value)`, oldest first
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().writes.clone()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let inner = self.inner.lock().unwrap();
            if inner.fail_reads {
                return Err(StorageError::Backend("injected read failure".to_string()));
            }
            Ok(inner.records.get(key).cloned())
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let mut inner = self.inner.lock().unwrap();
            if inner.fail_writes {
                return Err(StorageError::Backend("injected write failure".to_string()));
            }
            inner.records.insert(key.to_string(), value.clone());
            inner.writes.push((key.to_string(), value));
            Ok(())
        })
    }
}
