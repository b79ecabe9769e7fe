//! Key-value backed project repository.

use async_trait::async_trait;
use std::sync::Arc;

use super::{remove_from, upsert_into};
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::storage::{JsonCollection, PROJECTS_KEY, ports::KeyValueStore};

/// Project repository persisting the collection under [`PROJECTS_KEY`].
pub struct KeyValueProjectRepository<S> {
    projects: JsonCollection<S, Project>,
}

impl<S: KeyValueStore> KeyValueProjectRepository<S> {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            projects: JsonCollection::new(store, PROJECTS_KEY),
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> ProjectRepository for KeyValueProjectRepository<S> {
    async fn find_by_id(&self, id: &ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.load()?;
        Ok(projects.into_iter().find(|project| project.id() == id))
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        Ok(self.projects.load()?)
    }

    async fn upsert(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.projects.update(|projects| {
            upsert_into(projects, project);
            Ok::<_, ProjectRepositoryError>(())
        })
    }

    async fn delete(&self, id: &ProjectId) -> ProjectRepositoryResult<()> {
        self.projects.update(|projects| remove_from(projects, id))
    }
}
