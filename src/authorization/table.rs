//! Immutable (role, status) → destinations policy table.

use super::Role;
use crate::status::StatusKey;
use std::collections::{BTreeSet, HashMap};

/// Destinations a manager may choose from any status.
const MANAGER_DESTINATIONS: [StatusKey; 3] =
    [StatusKey::Valid, StatusKey::Cancelled, StatusKey::Done];

/// Mapping from (role, current status) to the permitted destination statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    rules: HashMap<(Role, StatusKey), BTreeSet<StatusKey>>,
}

impl TransitionTable {
    /// Starts an empty table.
    #[must_use]
    pub fn builder() -> TransitionTableBuilder {
        TransitionTableBuilder::default()
    }

    /// Builds the standard policy.
    ///
    /// Developers move `VALID → IN_PROGRESS → DONE` one step at a time and
    /// have no destination from any other status. Managers may move a task
    /// from any status to `VALID`, `CANCELLED`, or `DONE`, including onto
    /// the status it already holds.
    #[must_use]
    pub fn standard() -> Self {
        let builder = StatusKey::ALL
            .into_iter()
            .fold(Self::builder(), |builder, status| {
                builder
                    .deny_all(Role::Developer, status)
                    .allow(Role::Manager, status, MANAGER_DESTINATIONS)
            });

        builder
            .allow(Role::Developer, StatusKey::Valid, [StatusKey::InProgress])
            .allow(Role::Developer, StatusKey::InProgress, [StatusKey::Done])
            .build()
    }

    /// Returns the destinations recorded for `(role, status)`, or `None`
    /// when the table has no entry for the pair.
    #[must_use]
    pub fn destinations(&self, role: Role, status: StatusKey) -> Option<&BTreeSet<StatusKey>> {
        self.rules.get(&(role, status))
    }

    /// Lists every (role, status) pair without an entry.
    #[must_use]
    pub fn gaps(&self) -> Vec<(Role, StatusKey)> {
        Role::ALL
            .into_iter()
            .flat_map(|role| StatusKey::ALL.into_iter().map(move |status| (role, status)))
            .filter(|pair| !self.rules.contains_key(pair))
            .collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Incremental constructor for [`TransitionTable`].
#[derive(Debug, Clone, Default)]
pub struct TransitionTableBuilder {
    rules: HashMap<(Role, StatusKey), BTreeSet<StatusKey>>,
}

impl TransitionTableBuilder {
    /// Permits `role` to move a task from `from` to each of `to`.
    ///
    /// Repeated calls for the same pair accumulate destinations.
    #[must_use]
    pub fn allow(
        mut self,
        role: Role,
        from: StatusKey,
        to: impl IntoIterator<Item = StatusKey>,
    ) -> Self {
        self.rules.entry((role, from)).or_default().extend(to);
        self
    }

    /// Records an explicit empty entry for `(role, from)`.
    #[must_use]
    pub fn deny_all(mut self, role: Role, from: StatusKey) -> Self {
        self.rules.entry((role, from)).or_default();
        self
    }

    /// Freezes the table.
    #[must_use]
    pub fn build(self) -> TransitionTable {
        TransitionTable { rules: self.rules }
    }
}
