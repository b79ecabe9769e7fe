//! Repository port for project persistence and lookup.

use crate::project::domain::{Project, ProjectId};
use crate::storage::ports::StorageError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: &ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project in insertion order.
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Inserts a new project or replaces the project with the same
    /// identifier.
    async fn upsert(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: &ProjectId) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted records.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<StorageError> for ProjectRepositoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization { .. } => Self::invalid_persisted_data(err),
            StorageError::InvalidKey(_) | StorageError::Io(_) => Self::persistence(err),
        }
    }
}
