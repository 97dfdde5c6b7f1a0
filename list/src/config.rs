//! Configuration for the shopping list.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ConfigError;
use crate::persistence::DEFAULT_STORAGE_KEY;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Directory holding the record files
pub const DATA_DIR_VAR: &str = "SHOPPING_LIST_DATA_DIR";
/// Key of the persisted record
pub const STORAGE_KEY_VAR: &str = "SHOPPING_LIST_STORAGE_KEY";
/// Milliseconds to wait for pending writes on shutdown
pub const FLUSH_TIMEOUT_VAR: &str = "SHOPPING_LIST_FLUSH_TIMEOUT_MS";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_FLUSH_TIMEOUT_MS: u64 = 5000;

/// Shopping list configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Directory the file storage writes to
    pub data_dir: PathBuf,
    /// Key the collection is persisted under
    pub storage_key: String,
    /// How long `close` waits for pending writes
    pub flush_timeout: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            flush_timeout: Duration::from_millis(DEFAULT_FLUSH_TIMEOUT_MS),
        }
    }
}

impl ListConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let flush_timeout = match lookup(FLUSH_TIMEOUT_VAR) {
            Some(value) => Duration::from_millis(value.trim().parse().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: FLUSH_TIMEOUT_VAR,
                    value,
                }
            })?),
            None => defaults.flush_timeout,
        };

        let config = Self {
            data_dir: lookup(DATA_DIR_VAR).map_or(defaults.data_dir, PathBuf::from),
            storage_key: lookup(STORAGE_KEY_VAR).unwrap_or(defaults.storage_key),
            flush_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the storage key can name a file in the data directory
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStorageKey`] for a blank key and
    /// [`ConfigError::InvalidStorageKey`] for a key with path separators.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.storage_key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        Ok(())
    }
}
