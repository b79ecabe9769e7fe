//! Registry of persisted status entries.

use super::{StatusEntry, StatusId, StatusKey, UNKNOWN_STATUS_NAME};
use std::collections::HashSet;
use thiserror::Error;

/// Errors returned while building a [`StatusRegistry`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusRegistryError {
    /// Two entries share the same storage identifier.
    #[error("duplicate status identifier: {0}")]
    DuplicateIdentifier(StatusId),
}

/// Immutable catalog of status entries keyed by storage identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegistry {
    entries: Vec<StatusEntry>,
}

impl StatusRegistry {
    /// Builds a registry from seed or configuration entries.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRegistryError::DuplicateIdentifier`] when two entries
    /// share an identifier.
    pub fn new(entries: impl IntoIterator<Item = StatusEntry>) -> Result<Self, StatusRegistryError> {
        let entries: Vec<StatusEntry> = entries.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(StatusRegistryError::DuplicateIdentifier(entry.id().clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Returns the display name for a raw status key.
    ///
    /// Unrecognized keys yield [`UNKNOWN_STATUS_NAME`].
    #[must_use]
    pub fn name_of(key: &str) -> &'static str {
        StatusKey::try_from(key).map_or(UNKNOWN_STATUS_NAME, StatusKey::name)
    }

    /// Resolves a persisted identifier against this registry's entries.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<StatusKey> {
        resolve(identifier, &self.entries)
    }

    /// Returns the first identifier whose entry names `key`.
    #[must_use]
    pub fn identifier_of(&self, key: StatusKey) -> Option<&StatusId> {
        self.entries
            .iter()
            .find(|entry| key_for_name(entry.name()) == Some(key))
            .map(StatusEntry::id)
    }
}

/// Resolves a persisted identifier to its canonical status.
///
/// Returns `None` when no entry carries `identifier` or when the matching
/// entry's name does not denote a canonical status.
#[must_use]
pub fn resolve(identifier: &str, entries: &[StatusEntry]) -> Option<StatusKey> {
    entries
        .iter()
        .find(|entry| entry.id().as_str() == identifier)
        .and_then(|entry| key_for_name(entry.name()))
}

fn key_for_name(name: &str) -> Option<StatusKey> {
    StatusKey::from_name(name).or_else(|| StatusKey::try_from(name).ok())
}
