//! Session port recording the signed-in user.

use super::UserRepositoryResult;
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Storage for the identifier of the signed-in user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the signed-in user, if any.
    async fn current(&self) -> UserRepositoryResult<Option<UserId>>;

    /// Records `user_id` as signed in, replacing any previous session.
    async fn begin(&self, user_id: &UserId) -> UserRepositoryResult<()>;

    /// Clears the session. Ending an absent session succeeds.
    async fn end(&self) -> UserRepositoryResult<()>;
}
