//! Error types for the shopping list.
//!
//! None of these reach a caller of the list operations: hydration and write
//! failures are recovered where they happen and only logged.

use shopping_list_core::storage::StorageError;
use thiserror::Error;

/// Loading the persisted record failed
///
/// Recovered by starting from an empty collection.
#[derive(Error, Debug)]
pub enum HydrationError {
    /// The storage backend could not be read
    #[error("failed to read persisted list: {0}")]
    Read(#[source] StorageError),

    /// The record is not a valid item array
    #[error("persisted list is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Writing the collection failed
///
/// Recovered by logging; in-memory state stays authoritative.
#[derive(Error, Debug)]
pub enum PersistenceWriteError {
    /// The collection could not be encoded
    #[error("failed to encode list: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write
    #[error("failed to write list: {0}")]
    Write(#[source] StorageError),
}

/// Invalid configuration value
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The storage key is empty
    #[error("storage key must not be empty")]
    EmptyStorageKey,

    /// The storage key would escape the data directory
    #[error("storage key {0:?} must not contain path separators")]
    InvalidStorageKey(String),

    /// A numeric variable could not be parsed
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Environment variable name
        name: &'static str,
        /// Raw value
        value: String,
    },
}
