//! Display style classes for statuses.

use super::StatusKey;
use serde::{Deserialize, Serialize};

/// Visual style class associated with a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    /// Validated work.
    Success,
    /// Work underway.
    Warning,
    /// Work not yet started.
    Secondary,
    /// Abandoned work.
    Danger,
    /// Completed work.
    Primary,
    /// Fallback for statuses without a dedicated style.
    Neutral,
}

impl StatusStyle {
    /// Picks the style for a resolved status, or [`Self::Neutral`] when the
    /// status is unknown.
    #[must_use]
    pub const fn for_status(status: Option<StatusKey>) -> Self {
        match status {
            Some(StatusKey::Valid) => Self::Success,
            Some(StatusKey::InProgress) => Self::Warning,
            Some(StatusKey::ToDo) => Self::Secondary,
            Some(StatusKey::Cancelled) => Self::Danger,
            Some(StatusKey::Done) => Self::Primary,
            Some(StatusKey::Pending) | None => Self::Neutral,
        }
    }

    /// Returns the CSS class list for this style.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "bg-success",
            Self::Warning => "bg-warning text-dark",
            Self::Secondary => "bg-secondary",
            Self::Danger => "bg-danger",
            Self::Primary => "bg-primary",
            Self::Neutral => "bg-light text-dark border",
        }
    }
}
