//! Domain model for tasks and their comments.
//!
//! A task stores its status as a persisted [`StatusId`](crate::status::StatusId)
//! rather than a [`StatusKey`](crate::status::StatusKey); the status registry
//! resolves it. Status changes are applied only by the task service, after
//! the transition authorizer has approved them.

mod comment;
mod error;
mod ids;
mod task;

pub use comment::Comment;
pub use error::TaskDomainError;
pub use ids::{CommentId, TaskId};
pub use task::{Task, TaskDraft};
