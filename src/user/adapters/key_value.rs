//! Key-value backed user repository and session store.

use async_trait::async_trait;
use std::sync::Arc;

use super::{remove_from, upsert_into};
use crate::storage::{JsonCollection, SESSION_KEY, USERS_KEY, ports::KeyValueStore};
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{SessionStore, UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// User repository persisting the collection under [`USERS_KEY`].
pub struct KeyValueUserRepository<S> {
    users: JsonCollection<S, User>,
}

impl<S: KeyValueStore> KeyValueUserRepository<S> {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            users: JsonCollection::new(store, USERS_KEY),
        }
    }

    /// Returns `true` when a user collection has ever been written.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn is_initialized(&self) -> UserRepositoryResult<bool> {
        Ok(self.users.exists()?)
    }
}

#[async_trait]
impl<S: KeyValueStore> UserRepository for KeyValueUserRepository<S> {
    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let users = self.users.load()?;
        Ok(users.into_iter().find(|user| user.id() == id))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let users = self.users.load()?;
        Ok(users.into_iter().find(|user| user.email() == email))
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        Ok(self.users.load()?)
    }

    async fn upsert(&self, user: &User) -> UserRepositoryResult<()> {
        self.users.update(|users| upsert_into(users, user))
    }

    async fn delete(&self, id: &UserId) -> UserRepositoryResult<()> {
        self.users.update(|users| remove_from(users, id))
    }
}

/// Session store persisting the signed-in user id under [`SESSION_KEY`].
pub struct KeyValueSessionStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> KeyValueSessionStore<S> {
    /// Creates a session store over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore> SessionStore for KeyValueSessionStore<S> {
    async fn current(&self) -> UserRepositoryResult<Option<UserId>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(UserRepositoryError::invalid_persisted_data)
    }

    async fn begin(&self, user_id: &UserId) -> UserRepositoryResult<()> {
        let raw = serde_json::to_string(user_id).map_err(UserRepositoryError::persistence)?;
        Ok(self.store.set(SESSION_KEY, &raw)?)
    }

    async fn end(&self) -> UserRepositoryResult<()> {
        Ok(self.store.remove(SESSION_KEY)?)
    }
}
