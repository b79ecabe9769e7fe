//! Bundled starter data: status catalog, demo users, projects, and tasks.
//!
//! The document stores plain-text passwords; they are hashed when the
//! document is converted into domain records.

use crate::authorization::Role;
use crate::project::domain::{Project, ProjectDomainError, ProjectId};
use crate::status::{StatusEntry, StatusId, StatusRegistry, StatusRegistryError};
use crate::task::domain::{Task, TaskDomainError, TaskDraft, TaskId};
use crate::user::domain::{EmailAddress, PasswordDigest, User, UserDomainError, UserId};
use mockable::Clock;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DEFAULT_SEED: &str = include_str!("default_seed.json");

/// Errors raised while reading or converting a seed document.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The document is not valid seed JSON.
    #[error("malformed seed document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The status catalog repeats an identifier.
    #[error(transparent)]
    Status(#[from] StatusRegistryError),
    /// A seed user failed validation.
    #[error("invalid seed user {id}: {source}")]
    User {
        /// Seed identifier.
        id: String,
        /// Validation failure.
        source: UserDomainError,
    },
    /// A seed project failed validation.
    #[error("invalid seed project {id}: {source}")]
    Project {
        /// Seed identifier.
        id: String,
        /// Validation failure.
        source: ProjectDomainError,
    },
    /// A seed task failed validation.
    #[error("invalid seed task {id}: {source}")]
    Task {
        /// Seed identifier.
        id: String,
        /// Validation failure.
        source: TaskDomainError,
    },
}

/// Raw seed document.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    statuses: Vec<StatusEntry>,
    #[serde(default)]
    users: Vec<SeedUser>,
    #[serde(default)]
    projects: Vec<SeedProject>,
    #[serde(default)]
    tasks: Vec<SeedTask>,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedUser {
    id: String,
    name: String,
    email: String,
    password: String,
    roles: Vec<Role>,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedProject {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    manager_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedTask {
    id: String,
    project_id: String,
    title: String,
    #[serde(default)]
    description: String,
    status: String,
    assigned_to: Option<String>,
}

/// Domain records produced from a seed document.
#[derive(Debug, Clone)]
pub struct SeedData {
    /// Users with hashed passwords.
    pub users: Vec<User>,
    /// Projects with their task ids attached.
    pub projects: Vec<Project>,
    /// Tasks in document order.
    pub tasks: Vec<Task>,
}

impl SeedDocument {
    /// Returns the document bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_json(DEFAULT_SEED)
    }

    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] when `raw` is not a seed document.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the status registry from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Status`] when the catalog repeats an identifier.
    pub fn registry(&self) -> Result<StatusRegistry, SeedError> {
        Ok(StatusRegistry::new(self.statuses.iter().cloned())?)
    }

    /// Converts the users, projects, and tasks into domain records.
    ///
    /// Each project's task list is rebuilt from the tasks naming it.
    ///
    /// # Errors
    ///
    /// Returns the [`SeedError`] variant naming the first record that fails
    /// validation.
    pub fn into_data(self, clock: &impl Clock) -> Result<SeedData, SeedError> {
        let users = self
            .users
            .into_iter()
            .map(SeedUser::into_user)
            .collect::<Result<Vec<_>, _>>()?;

        let mut projects = self
            .projects
            .into_iter()
            .map(SeedProject::into_project)
            .collect::<Result<Vec<_>, _>>()?;

        let tasks = self
            .tasks
            .into_iter()
            .map(|task| task.into_task(clock))
            .collect::<Result<Vec<_>, _>>()?;

        for task in &tasks {
            if let Some(project) = projects
                .iter_mut()
                .find(|project| project.id() == task.project_id())
            {
                project.attach_task(task.id().clone());
            }
        }

        debug!(
            users = users.len(),
            projects = projects.len(),
            tasks = tasks.len(),
            "seed document converted"
        );
        Ok(SeedData {
            users,
            projects,
            tasks,
        })
    }
}

impl SeedUser {
    fn into_user(self) -> Result<User, SeedError> {
        let Self {
            id,
            name,
            email,
            password,
            roles,
        } = self;
        let build = || {
            let address = EmailAddress::new(email)?;
            let digest = PasswordDigest::hash(&password)?;
            User::with_id(UserId::from_raw(id.as_str()), name, address, digest, roles)
        };
        build().map_err(|source| SeedError::User { id, source })
    }
}

impl SeedProject {
    fn into_project(self) -> Result<Project, SeedError> {
        let managers = self.manager_ids.into_iter().map(UserId::from_raw);
        Project::with_id(
            ProjectId::from_raw(self.id.as_str()),
            self.title,
            self.description,
            managers,
        )
        .map_err(|source| SeedError::Project {
            id: self.id,
            source,
        })
    }
}

impl SeedTask {
    fn into_task(self, clock: &impl Clock) -> Result<Task, SeedError> {
        let draft = TaskDraft {
            project_id: ProjectId::from_raw(self.project_id),
            title: self.title,
            description: self.description,
            status: StatusId::new(self.status),
            assigned_to: self.assigned_to.map(UserId::from_raw),
        };
        Task::with_id(TaskId::from_raw(self.id.as_str()), draft, clock).map_err(|source| {
            SeedError::Task {
                id: self.id,
                source,
            }
        })
    }
}
