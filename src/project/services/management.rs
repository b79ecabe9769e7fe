//! Project creation, editing, deletion, and lookup.

use crate::authorization::Role;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::domain::{User, UserId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: String,
    manager_ids: Vec<UserId>,
}

impl CreateProjectRequest {
    /// Creates a request with a title and no extra managers.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            manager_ids: Vec::new(),
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds co-managers alongside the creator.
    #[must_use]
    pub fn with_managers(mut self, manager_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.manager_ids = manager_ids.into_iter().collect();
        self
    }
}

/// Request payload for editing a project. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    title: Option<String>,
    description: Option<String>,
    manager_ids: Option<Vec<UserId>>,
}

impl UpdateProjectRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the manager list.
    #[must_use]
    pub fn with_managers(mut self, manager_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.manager_ids = Some(manager_ids.into_iter().collect());
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Task repository operation failed while cascading a deletion.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// The actor does not hold the manager role.
    #[error("user {0} does not hold the manager role")]
    ManagerRoleRequired(UserId),
    /// The actor does not manage the project.
    #[error("user {user_id} does not manage project {project_id}")]
    NotProjectManager {
        /// Target project.
        project_id: ProjectId,
        /// Acting user.
        user_id: UserId,
    },
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<P, T> ProjectService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>) -> Self {
        Self { projects, tasks }
    }

    /// Creates a project managed by `actor` and any requested co-managers.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ManagerRoleRequired`] when `actor` is
    /// not a manager, [`ProjectServiceError::Domain`] when the title is
    /// empty, or [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        actor: &User,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        if !actor.has_role(Role::Manager) {
            warn!(actor = %actor.id(), "project creation requires the manager role");
            return Err(ProjectServiceError::ManagerRoleRequired(actor.id().clone()));
        }
        let CreateProjectRequest {
            title,
            description,
            manager_ids,
        } = request;
        let managers = std::iter::once(actor.id().clone()).chain(manager_ids);
        let project = Project::new(title, description, managers)?;
        self.projects.upsert(&project).await?;
        info!(project_id = %project.id(), actor = %actor.id(), "project created");
        Ok(project)
    }

    /// Edits a project managed by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotProjectManager`] when `actor` does
    /// not manage the project, [`ProjectServiceError::Domain`] when the edit
    /// is invalid, or [`ProjectServiceError::Repository`] when the project is
    /// missing or persistence fails.
    pub async fn update(
        &self,
        actor: &User,
        project_id: &ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.managed_by(actor, project_id).await?;
        if let Some(title) = request.title {
            project.rename(title)?;
        }
        if let Some(description) = request.description {
            project.describe(description);
        }
        if let Some(manager_ids) = request.manager_ids {
            project.replace_managers(manager_ids)?;
        }
        self.projects.upsert(&project).await?;
        info!(project_id = %project.id(), actor = %actor.id(), "project updated");
        Ok(project)
    }

    /// Deletes a project managed by `actor` together with its tasks.
    ///
    /// Returns the number of tasks removed. The project is written back if
    /// its tasks cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotProjectManager`] when `actor` does
    /// not manage the project, or a repository error when the project is
    /// missing or persistence fails.
    pub async fn delete(&self, actor: &User, project_id: &ProjectId) -> ProjectServiceResult<usize> {
        let project = self.managed_by(actor, project_id).await?;
        self.projects.delete(project_id).await?;
        let removed = match self.tasks.delete_by_project(project_id).await {
            Ok(removed) => removed,
            Err(err) => {
                if let Err(restore) = self.projects.upsert(&project).await {
                    warn!(project_id = %project_id, error = %restore, "could not restore project");
                }
                return Err(err.into());
            }
        };
        info!(project_id = %project_id, actor = %actor.id(), removed_tasks = removed, "project deleted");
        Ok(removed)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, project_id: &ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Returns every project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list().await?)
    }

    /// Returns the projects managed by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_for_manager(&self, user_id: &UserId) -> ProjectServiceResult<Vec<Project>> {
        let mut projects = self.projects.list().await?;
        projects.retain(|project| project.is_managed_by(user_id));
        Ok(projects)
    }

    async fn managed_by(&self, actor: &User, project_id: &ProjectId) -> ProjectServiceResult<Project> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(project_id.clone()))?;
        if !project.is_managed_by(actor.id()) {
            warn!(project_id = %project_id, actor = %actor.id(), "actor does not manage project");
            return Err(ProjectServiceError::NotProjectManager {
                project_id: project_id.clone(),
                user_id: actor.id().clone(),
            });
        }
        Ok(project)
    }
}
