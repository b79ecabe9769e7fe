//! Key-value store port.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String-keyed store of JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys or
    /// [`StorageError::Io`] when the backing medium fails.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys or
    /// [`StorageError::Io`] when the backing medium fails.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys or
    /// [`StorageError::Io`] when the backing medium fails.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The key is empty or contains characters outside `[a-z0-9_-]`.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// A stored document could not be encoded or decoded.
    #[error("malformed document under '{key}': {source}")]
    Serialization {
        /// Key whose document failed to round-trip.
        key: String,
        /// Underlying JSON error.
        source: Arc<serde_json::Error>,
    },

    /// The backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl StorageError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Wraps a JSON error for the document under `key`.
    #[must_use]
    pub fn serialization(key: impl Into<String>, err: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source: Arc::new(err),
        }
    }
}

/// Checks that `key` is usable by every store implementation.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] when the key is empty or contains
/// characters outside `[a-z0-9_-]`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let is_valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-');
    if is_valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
