//! Transition authorizer.

use super::{Role, TransitionTable};
use crate::status::StatusKey;
use std::collections::BTreeSet;
use tracing::{debug, warn};

static NO_TRANSITIONS: BTreeSet<StatusKey> = BTreeSet::new();

/// Decides which status changes a role may make.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionAuthorizer {
    table: TransitionTable,
}

impl TransitionAuthorizer {
    /// Creates an authorizer over a fixed policy table.
    #[must_use]
    pub const fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    /// Returns the policy table.
    #[must_use]
    pub const fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the statuses `role` may move a task into from `current`.
    ///
    /// A pair missing from the table yields the empty set.
    #[must_use]
    pub fn available_transitions(&self, current: StatusKey, role: Role) -> &BTreeSet<StatusKey> {
        self.table.destinations(role, current).unwrap_or_else(|| {
            warn!(
                role = %role,
                status = %current,
                "transition table has no entry for role and status; denying"
            );
            &NO_TRANSITIONS
        })
    }

    /// Returns `true` when `role` may move a task from `current` to
    /// `proposed`.
    #[must_use]
    pub fn can_transition(&self, current: StatusKey, proposed: StatusKey, role: Role) -> bool {
        self.available_transitions(current, role).contains(&proposed)
    }

    /// Like [`Self::available_transitions`], for raw status and role strings.
    ///
    /// Both strings must match their canonical form exactly. An unparseable
    /// status or role yields the empty set.
    #[must_use]
    pub fn available_transitions_by_name(&self, current: &str, role: &str) -> &BTreeSet<StatusKey> {
        match (StatusKey::try_from(current), Role::try_from(role)) {
            (Ok(status), Ok(parsed_role)) => self.available_transitions(status, parsed_role),
            (status, parsed_role) => {
                debug!(
                    status = current,
                    role,
                    status_known = status.is_ok(),
                    role_known = parsed_role.is_ok(),
                    "unrecognized transition input; denying"
                );
                &NO_TRANSITIONS
            }
        }
    }

    /// Like [`Self::can_transition`], for raw status and role strings.
    #[must_use]
    pub fn can_transition_by_name(&self, current: &str, proposed: &str, role: &str) -> bool {
        StatusKey::try_from(proposed).is_ok_and(|target| {
            self.available_transitions_by_name(current, role)
                .contains(&target)
        })
    }

    /// Returns the union of the destinations permitted to each of `roles`.
    #[must_use]
    pub fn available_transitions_for_roles<'a>(
        &self,
        current: StatusKey,
        roles: impl IntoIterator<Item = &'a Role>,
    ) -> BTreeSet<StatusKey> {
        roles
            .into_iter()
            .flat_map(|role| self.available_transitions(current, *role).iter().copied())
            .collect()
    }

    /// Returns `true` when any of `roles` may make the transition.
    #[must_use]
    pub fn can_transition_for_roles<'a>(
        &self,
        current: StatusKey,
        proposed: StatusKey,
        roles: impl IntoIterator<Item = &'a Role>,
    ) -> bool {
        roles
            .into_iter()
            .any(|role| self.can_transition(current, proposed, *role))
    }
}
