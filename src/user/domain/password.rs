//! Argon2 password digests.

use super::UserDomainError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// PHC-format argon2 digest of a user's password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hashes a plain-text password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyPassword`] for an empty password or
    /// [`UserDomainError::PasswordHashing`] when argon2 rejects the input.
    pub fn hash(raw: &str) -> Result<Self, UserDomainError> {
        if raw.is_empty() {
            return Err(UserDomainError::EmptyPassword);
        }
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|err| UserDomainError::PasswordHashing(err.to_string()))?;
        Ok(Self(digest.to_string()))
    }

    /// Returns `true` when `raw` matches this digest.
    ///
    /// A digest that does not parse as a PHC string matches nothing.
    #[must_use]
    pub fn verify(&self, raw: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
