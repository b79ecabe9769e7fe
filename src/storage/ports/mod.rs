//! Port contracts for key-value persistence.

pub mod key_value;

pub use key_value::{KeyValueStore, StorageError, StorageResult, validate_key};
