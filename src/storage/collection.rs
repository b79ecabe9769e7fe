//! Typed JSON collections stored under a single key.

use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use super::ports::{KeyValueStore, StorageError, StorageResult};

/// A `Vec<T>` persisted as one JSON array under `key`.
///
/// [`Self::update`] serializes read-modify-write cycles issued through the
/// same collection value.
pub struct JsonCollection<S, T> {
    store: Arc<S>,
    key: &'static str,
    write_lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<S, T> JsonCollection<S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    /// Binds a collection to `key` in `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, key: &'static str) -> Self {
        Self {
            store,
            key,
            write_lock: Mutex::new(()),
            _items: PhantomData,
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Returns `true` when the key has been written.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn exists(&self) -> StorageResult<bool> {
        Ok(self.store.get(self.key)?.is_some())
    }

    /// Loads the collection. A missing key loads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] when the stored document is
    /// not a JSON array of `T`, or propagates store failures.
    pub fn load(&self) -> StorageResult<Vec<T>> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| StorageError::serialization(self.key, err))
    }

    /// Replaces the stored collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] when `items` cannot be
    /// encoded, or propagates store failures.
    pub fn save(&self, items: &[T]) -> StorageResult<()> {
        let raw =
            serde_json::to_string(items).map_err(|err| StorageError::serialization(self.key, err))?;
        self.store.set(self.key, &raw)
    }

    /// Loads the collection, applies `mutate`, and saves the result when
    /// `mutate` succeeds. Nothing is written when `mutate` fails.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `mutate`, or a converted
    /// [`StorageError`] when loading or saving fails.
    pub fn update<R, E>(&self, mutate: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StorageError::io(std::io::Error::other(err.to_string())))?;
        let mut items = self.load()?;
        let outcome = mutate(&mut items)?;
        self.save(&items)?;
        Ok(outcome)
    }
}
