//! Synchronising the collection with the key/value persistence primitive.
//!
//! The whole collection is stored as one JSON array under a single key.
//! Writes are fire-and-forget from the reducer's point of view: each one
//! carries the revision it snapshotted, and a write older than the last one
//! that landed is dropped so a late task can never roll storage back.

use crate::error::{HydrationError, PersistenceWriteError};
use crate::types::Item;
use shopping_list_core::storage::KeyValueStorage;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default key of the persisted record
pub const DEFAULT_STORAGE_KEY: &str = "shoppingList";

/// Encode the collection as the persisted JSON array
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if encoding fails.
pub fn encode_items(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode a persisted JSON array into a collection
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if `record` is not an item array.
pub fn decode_items(record: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(record)
}

/// What happened to a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The snapshot is now the stored record
    Written,
    /// A newer snapshot was already stored; nothing was written
    Stale,
}

/// Reads and writes the collection record
pub struct Persistence {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    last_written: Mutex<Option<u64>>,
}

impl Persistence {
    /// Persist under [`DEFAULT_STORAGE_KEY`]
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Persist under a custom key
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            last_written: Mutex::new(None),
        }
    }

    /// The underlying storage backend
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStorage> {
        Arc::clone(&self.storage)
    }

    /// Key of the persisted record
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the persisted collection
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError::Read`] if storage fails and
    /// [`HydrationError::Parse`] if the record is malformed.
    pub async fn load(&self) -> Result<Option<Vec<Item>>, HydrationError> {
        let Some(record) = self
            .storage
            .get(&self.key)
            .await
            .map_err(HydrationError::Read)?
        else {
            return Ok(None);
        };

        Ok(Some(decode_items(&record)?))
    }

    /// Store `items` as the snapshot taken at `revision`
    ///
    /// Writes are serialised; a revision not newer than the last stored one
    /// is skipped. A failed write does not advance the stored revision.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceWriteError`] if encoding or the storage write fails.
    pub async fn write(
        &self,
        revision: u64,
        items: &[Item],
    ) -> Result<WriteOutcome, PersistenceWriteError> {
        let mut last_written = self.last_written.lock().await;

        if last_written.is_some_and(|last| revision <= last) {
            return Ok(WriteOutcome::Stale);
        }

        let record = encode_items(items)?;
        self.storage
            .set(&self.key, record)
            .await
            .map_err(PersistenceWriteError::Write)?;

        *last_written = Some(revision);
        Ok(WriteOutcome::Written)
    }

    /// [`Persistence::write`] with the outcome reported through the log
    ///
    /// This is the form mutations use: failures are warnings, never errors.
    pub async fn write_logged(&self, revision: u64, items: Vec<Item>) {
        match self.write(revision, &items).await {
            Ok(WriteOutcome::Written) => {
                tracing::debug!(key = %self.key, revision, items = items.len(), "Persisted list");
            },
            Ok(WriteOutcome::Stale) => {
                tracing::debug!(key = %self.key, revision, "Skipped stale list snapshot");
            },
            Err(error) => {
                tracing::warn!(key = %self.key, revision, error = %error, "Failed to save list");
            },
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
