//! Key/value persistence primitive.
//!
//! The list core persists its whole collection as one string record under a
//! single key. This module defines the storage seam the core talks to; the
//! production adapter lives with the list domain and an in-memory fake lives
//! in the testing crate.
//!
//! # Dyn Compatibility
//!
//! The trait returns explicit `Pin<Box<dyn Future>>` values instead of using
//! `async fn` so it can be held as `Arc<dyn KeyValueStorage>` inside an
//! environment and captured by effects.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem or device error
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Boxed future returned by [`KeyValueStorage`] operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Asynchronous string key/value store.
///
/// # Examples
///
/// ```no_run
/// use shopping_list_core::storage::{KeyValueStorage, StorageError};
///
/// async fn copy_record<S: KeyValueStorage>(store: &S) -> Result<(), StorageError> {
///     if let Some(value) = store.get("shoppingList").await? {
///         store.set("shoppingList.bak", value).await?;
///     }
///     Ok(())
/// }
/// ```
pub trait KeyValueStorage: Send + Sync {
    /// Read the record stored under `key`.
    ///
    /// A key that was never written is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()>;
}
