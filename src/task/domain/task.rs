//! Task aggregate root.

use super::{Comment, TaskDomainError, TaskId};
use crate::project::domain::ProjectId;
use crate::status::StatusId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    status: StatusId,
    assigned_to: Option<UserId>,
    #[serde(default)]
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Initial status identifier.
    pub status: StatusId,
    /// Assignee, if any.
    pub assigned_to: Option<UserId>,
}

impl Task {
    /// Creates a task with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed title is
    /// empty.
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        Self::with_id(TaskId::new(), draft, clock)
    }

    /// Creates a task with a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_id(
        id: TaskId,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let TaskDraft {
            project_id,
            title,
            description,
            status,
            assigned_to,
        } = draft;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            project_id,
            title: validated_title(&title)?,
            description: description.trim().to_owned(),
            status,
            assigned_to,
            comments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
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

    /// Returns the persisted status identifier.
    #[must_use]
    pub const fn status(&self) -> &StatusId {
        &self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the comments in posting order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed title is
    /// empty; the task is left unchanged.
    pub fn rename(&mut self, title: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.title = validated_title(title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn describe(&mut self, description: &str, clock: &impl Clock) {
        self.description = description.trim().to_owned();
        self.touch(clock);
    }

    /// Sets or clears the assignee.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) {
        self.assigned_to = assignee;
        self.touch(clock);
    }

    /// Appends a comment.
    pub fn add_comment(&mut self, comment: Comment, clock: &impl Clock) {
        self.comments.push(comment);
        self.touch(clock);
    }

    /// Stores a new status identifier. Callers must have authorized the
    /// transition.
    pub(crate) fn set_status(&mut self, status: StatusId, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
