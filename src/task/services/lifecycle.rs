//! Service layer for task creation, editing, status changes, and comments.

use crate::authorization::{Role, TransitionAuthorizer};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::status::{StatusId, StatusKey, StatusRegistry};
use crate::task::{
    domain::{Comment, Task, TaskDomainError, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{User, UserId};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for adding a task to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    status: StatusKey,
    assigned_to: Option<UserId>,
}

impl AddTaskRequest {
    /// Creates a request for an unassigned `TO_DO` task.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            status: StatusKey::ToDo,
            assigned_to: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusKey) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }
}

/// Request payload for editing task details.
///
/// Unset fields are left unchanged. Status is edited only through
/// [`TaskLifecycleService::change_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<Option<UserId>>,
}

impl UpdateTaskRequest {
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

    /// Assigns the task to `user_id`.
    #[must_use]
    pub fn assign_to(mut self, user_id: UserId) -> Self {
        self.assignee = Some(Some(user_id));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn unassign(mut self) -> Self {
        self.assignee = Some(None);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// The actor does not hold the manager role.
    #[error("user {0} does not hold the manager role")]
    ManagerRoleRequired(UserId),
    /// The task's stored status identifier names no registry entry.
    #[error("task {task_id} has unresolvable status identifier {status}")]
    UnresolvableStatus {
        /// Task carrying the identifier.
        task_id: TaskId,
        /// Stored identifier.
        status: StatusId,
    },
    /// None of the actor's roles permits the transition.
    #[error("transition from {from} to {to} denied for task {task_id}")]
    TransitionDenied {
        /// Task whose status was to change.
        task_id: TaskId,
        /// Current status.
        from: StatusKey,
        /// Proposed status.
        to: StatusKey,
    },
    /// The registry has no identifier for the status.
    #[error("status {0} has no registered identifier")]
    UnregisteredStatus(StatusKey),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every status change goes through [`TransitionAuthorizer`]; there is no
/// other path that writes a task's status.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    registry: Arc<StatusRegistry>,
    authorizer: Arc<TransitionAuthorizer>,
    clock: Arc<C>,
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        registry: Arc<StatusRegistry>,
        authorizer: Arc<TransitionAuthorizer>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            projects,
            registry,
            authorizer,
            clock,
        }
    }

    /// Adds a task to an existing project.
    ///
    /// The task is removed again if the project cannot be updated to list it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ManagerRoleRequired`] when `actor` is
    /// not a manager, [`TaskLifecycleError::Project`] when the project does
    /// not exist, [`TaskLifecycleError::UnregisteredStatus`] when the initial
    /// status has no identifier, or [`TaskLifecycleError::Domain`] when the
    /// title is empty.
    pub async fn add_task(&self, actor: &User, request: AddTaskRequest) -> TaskLifecycleResult<Task> {
        require_manager(actor)?;
        let AddTaskRequest {
            project_id,
            title,
            description,
            status,
            assigned_to,
        } = request;

        let mut project = self
            .projects
            .find_by_id(&project_id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(project_id.clone()))?;
        let status_id = self
            .registry
            .identifier_of(status)
            .cloned()
            .ok_or(TaskLifecycleError::UnregisteredStatus(status))?;

        let draft = TaskDraft {
            project_id,
            title,
            description,
            status: status_id,
            assigned_to,
        };
        let task = Task::new(draft, &*self.clock)?;
        self.tasks.upsert(&task).await?;
        project.attach_task(task.id().clone());
        if let Err(err) = self.projects.upsert(&project).await {
            if let Err(cleanup) = self.tasks.delete(task.id()).await {
                warn!(task_id = %task.id(), error = %cleanup, "could not remove unlinked task");
            }
            return Err(err.into());
        }
        info!(task_id = %task.id(), project_id = %project.id(), actor = %actor.id(), "task added");
        Ok(task)
    }

    /// Edits a task's title, description, or assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ManagerRoleRequired`] when `actor` is
    /// not a manager, [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, or
    /// [`TaskLifecycleError::Domain`] when the new title is empty.
    pub async fn update_details(
        &self,
        actor: &User,
        task_id: &TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        require_manager(actor)?;
        let mut task = self.load(task_id).await?;
        let clock = &*self.clock;
        if let Some(title) = request.title {
            task.rename(&title, clock)?;
        }
        if let Some(description) = request.description {
            task.describe(&description, clock);
        }
        if let Some(assignee) = request.assignee {
            task.assign(assignee, clock);
        }
        self.tasks.upsert(&task).await?;
        debug!(task_id = %task.id(), "task details updated");
        Ok(task)
    }

    /// Moves a task to `proposed` when any of the actor's roles permits it.
    ///
    /// On denial the task is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnresolvableStatus`] when the current
    /// identifier names no registry entry,
    /// [`TaskLifecycleError::TransitionDenied`] when no role permits the
    /// move, [`TaskLifecycleError::UnregisteredStatus`] when `proposed` has
    /// no identifier, or [`TaskLifecycleError::Repository`] when the task is
    /// missing or persistence fails.
    pub async fn change_status(
        &self,
        actor: &User,
        task_id: &TaskId,
        proposed: StatusKey,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let current = self.current_status(&task)?;

        if !self
            .authorizer
            .can_transition_for_roles(current, proposed, actor.roles())
        {
            warn!(
                task_id = %task.id(),
                actor = %actor.id(),
                from = current.as_str(),
                to = proposed.as_str(),
                "status transition denied"
            );
            return Err(TaskLifecycleError::TransitionDenied {
                task_id: task.id().clone(),
                from: current,
                to: proposed,
            });
        }

        let status_id = self
            .registry
            .identifier_of(proposed)
            .cloned()
            .ok_or(TaskLifecycleError::UnregisteredStatus(proposed))?;
        task.set_status(status_id, &*self.clock);
        self.tasks.upsert(&task).await?;
        info!(
            task_id = %task.id(),
            actor = %actor.id(),
            from = current.as_str(),
            to = proposed.as_str(),
            "task status changed"
        );
        Ok(task)
    }

    /// Returns the statuses `actor` may move the task to.
    ///
    /// A task whose stored identifier cannot be resolved offers no
    /// destinations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task is missing
    /// or persistence fails.
    pub async fn available_statuses(
        &self,
        actor: &User,
        task_id: &TaskId,
    ) -> TaskLifecycleResult<BTreeSet<StatusKey>> {
        let task = self.load(task_id).await?;
        let Some(current) = self.registry.resolve(task.status().as_str()) else {
            debug!(task_id = %task.id(), status = %task.status(), "unresolvable status offers no transitions");
            return Ok(BTreeSet::new());
        };
        Ok(self
            .authorizer
            .available_transitions_for_roles(current, actor.roles()))
    }

    /// Appends a comment authored by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the trimmed content is
    /// empty or [`TaskLifecycleError::Repository`] when the task is missing
    /// or persistence fails.
    pub async fn add_comment(
        &self,
        actor: &User,
        task_id: &TaskId,
        content: &str,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let comment = Comment::new(actor.id().clone(), content, &*self.clock)?;
        debug!(task_id = %task.id(), comment_id = %comment.id(), "comment added");
        task.add_comment(comment, &*self.clock);
        self.tasks.upsert(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, task_id: &TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Returns a project's tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_project(&self, project_id: &ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Returns the tasks assigned to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_assigned_to(&self, user_id: &UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_assigned_to(user_id).await?)
    }

    async fn load(&self, task_id: &TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(task_id.clone()).into())
    }

    fn current_status(&self, task: &Task) -> TaskLifecycleResult<StatusKey> {
        self.registry
            .resolve(task.status().as_str())
            .ok_or_else(|| TaskLifecycleError::UnresolvableStatus {
                task_id: task.id().clone(),
                status: task.status().clone(),
            })
    }
}

fn require_manager(actor: &User) -> TaskLifecycleResult<()> {
    if actor.has_role(Role::Manager) {
        Ok(())
    } else {
        warn!(actor = %actor.id(), "manager role required");
        Err(TaskLifecycleError::ManagerRoleRequired(actor.id().clone()))
    }
}
