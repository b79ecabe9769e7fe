//! Canonical status keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Display name returned for status keys outside the canonical catalog.
pub const UNKNOWN_STATUS_NAME: &str = "unknown";

/// Canonical task lifecycle status.
///
/// Variants are declared in catalog order, which is also their sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKey {
    /// Work has been recorded but not yet validated.
    ToDo,
    /// A manager has validated the task for work.
    Valid,
    /// A developer is working on the task.
    InProgress,
    /// The task is waiting on something outside the team.
    Pending,
    /// The task is complete.
    Done,
    /// The task has been abandoned.
    Cancelled,
}

impl StatusKey {
    /// Every canonical status in catalog order.
    pub const ALL: [Self; 6] = [
        Self::ToDo,
        Self::Valid,
        Self::InProgress,
        Self::Pending,
        Self::Done,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::Valid => "VALID",
            Self::InProgress => "IN_PROGRESS",
            Self::Pending => "PENDING",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ToDo => "To do",
            Self::Valid => "Valid",
            Self::InProgress => "In progress",
            Self::Pending => "Pending",
            Self::Done => "Done",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Finds the status whose display name matches `name` exactly.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts only the exact storage representation.
impl TryFrom<&str> for StatusKey {
    type Error = ParseStatusKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "TO_DO" => Ok(Self::ToDo),
            "VALID" => Ok(Self::Valid),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "PENDING" => Ok(Self::Pending),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseStatusKeyError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a status key string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status key: {0}")]
pub struct ParseStatusKeyError(pub String);
