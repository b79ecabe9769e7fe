//! Repository port for task persistence and lookup.

use crate::project::domain::ProjectId;
use crate::storage::ports::StorageError;
use crate::task::domain::{Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task in insertion order.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks belonging to a project, in insertion order.
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks assigned to a user, in insertion order.
    async fn list_assigned_to(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Inserts a new task or replaces the task with the same identifier.
    async fn upsert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Deletes every task belonging to a project and returns how many were
    /// removed.
    async fn delete_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted records.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<StorageError> for TaskRepositoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization { .. } => Self::invalid_persisted_data(err),
            StorageError::InvalidKey(_) | StorageError::Io(_) => Self::persistence(err),
        }
    }
}
