//! In-memory project repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{remove_from, upsert_into};
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

fn poisoned(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(poisoned)?;
        Ok(projects.iter().find(|project| project.id() == id).cloned())
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(poisoned)?;
        Ok(projects.clone())
    }

    async fn upsert(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        upsert_into(&mut projects, project);
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        remove_from(&mut projects, id)
    }
}
