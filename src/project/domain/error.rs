//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing or editing projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project title is empty after trimming.
    #[error("project title must not be empty")]
    EmptyTitle,

    /// The edit would leave the project without a manager.
    #[error("project must keep at least one manager")]
    NoManagers,
}
