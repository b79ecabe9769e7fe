//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Permission class held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Creates projects and tasks; validates, cancels, and completes tasks.
    Manager,
    /// Moves validated tasks through implementation.
    Developer,
}

impl Role {
    /// Every known role.
    pub const ALL: [Self; 2] = [Self::Manager, Self::Developer];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Developer => "developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts only the exact storage representation.
impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "manager" => Ok(Self::Manager),
            "developer" => Ok(Self::Developer),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
