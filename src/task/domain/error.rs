//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing or editing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment content is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,
}
