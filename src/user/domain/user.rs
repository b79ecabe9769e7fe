//! User aggregate.

use super::{EmailAddress, PasswordDigest, UserDomainError, UserId};
use crate::authorization::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    password_hash: PasswordDigest,
    roles: BTreeSet<Role>,
}

impl User {
    /// Creates a user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the trimmed name is empty
    /// or [`UserDomainError::NoRoles`] when `roles` is empty.
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        password_hash: PasswordDigest,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, UserDomainError> {
        Self::with_id(UserId::new(), name, email, password_hash, roles)
    }

    /// Creates a user with a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: EmailAddress,
        password_hash: PasswordDigest,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, UserDomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(UserDomainError::EmptyName);
        }
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(UserDomainError::NoRoles);
        }
        Ok(Self {
            id,
            name,
            email,
            password_hash,
            roles,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the roles held by the user.
    #[must_use]
    pub const fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Returns `true` when the user holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns `true` when `password` matches the stored digest.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash.verify(password)
    }
}
