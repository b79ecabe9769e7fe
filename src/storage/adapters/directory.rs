//! Directory-backed key-value store.
//!
//! Each key is stored as `<key>.json` inside a capability-scoped directory.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! reader never observes a half-written document.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Mutex;

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult, validate_key};

/// Key-value store persisting one JSON file per key.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
    write_lock: Mutex<()>,
}

impl DirectoryKeyValueStore {
    /// Opens the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(StorageError::io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::io)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already-opened directory capability.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }
}

fn document_name(key: &str) -> String {
    format!("{key}.json")
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        match self.dir.read_to_string(document_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StorageError::io(std::io::Error::other(err.to_string())))?;
        let target = document_name(key);
        let staging = format!("{target}.tmp");
        self.dir.write(&staging, value).map_err(StorageError::io)?;
        self.dir
            .rename(&staging, &self.dir, &target)
            .map_err(StorageError::io)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StorageError::io(std::io::Error::other(err.to_string())))?;
        match self.dir.remove_file(document_name(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(err)),
        }
    }
}
