//! Project aggregate.

use super::{ProjectDomainError, ProjectId};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// A project owning an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    manager_ids: Vec<UserId>,
    task_ids: Vec<TaskId>,
}

impl Project {
    /// Creates a project with a fresh identifier and no tasks.
    ///
    /// Duplicate manager ids are collapsed, keeping first occurrence order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyTitle`] when the trimmed title is
    /// empty or [`ProjectDomainError::NoManagers`] when `manager_ids` is
    /// empty.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        manager_ids: impl IntoIterator<Item = UserId>,
    ) -> Result<Self, ProjectDomainError> {
        Self::with_id(ProjectId::new(), title, description, manager_ids)
    }

    /// Creates a project with a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_id(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        manager_ids: impl IntoIterator<Item = UserId>,
    ) -> Result<Self, ProjectDomainError> {
        let mut project = Self {
            id,
            title: validated_title(title.into())?,
            description: description.into().trim().to_owned(),
            manager_ids: Vec::new(),
            task_ids: Vec::new(),
        };
        project.replace_managers(manager_ids)?;
        Ok(project)
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the managers in assignment order.
    #[must_use]
    pub fn manager_ids(&self) -> &[UserId] {
        &self.manager_ids
    }

    /// Returns the task ids in creation order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns `true` when `user_id` manages this project.
    #[must_use]
    pub fn is_managed_by(&self, user_id: &UserId) -> bool {
        self.manager_ids.contains(user_id)
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyTitle`] when the trimmed title is
    /// empty.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), ProjectDomainError> {
        self.title = validated_title(title.into())?;
        Ok(())
    }

    /// Replaces the description.
    pub fn describe(&mut self, description: impl Into<String>) {
        self.description = description.into().trim().to_owned();
    }

    /// Replaces the manager list.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NoManagers`] when `manager_ids` is empty;
    /// the current managers are kept.
    pub fn replace_managers(
        &mut self,
        manager_ids: impl IntoIterator<Item = UserId>,
    ) -> Result<(), ProjectDomainError> {
        let mut deduplicated: Vec<UserId> = Vec::new();
        for id in manager_ids {
            if !deduplicated.contains(&id) {
                deduplicated.push(id);
            }
        }
        if deduplicated.is_empty() {
            return Err(ProjectDomainError::NoManagers);
        }
        self.manager_ids = deduplicated;
        Ok(())
    }

    /// Records `task_id` as belonging to this project.
    pub(crate) fn attach_task(&mut self, task_id: TaskId) {
        if !self.task_ids.contains(&task_id) {
            self.task_ids.push(task_id);
        }
    }
}

fn validated_title(title: String) -> Result<String, ProjectDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
