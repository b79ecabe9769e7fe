//! In-memory user repository and session store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{remove_from, upsert_into};
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{SessionStore, UserRepository, UserRepositoryError, UserRepositoryResult},
};

fn poisoned(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.clone())
    }

    async fn upsert(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        upsert_into(&mut users, user)
    }

    async fn delete(&self, id: &UserId) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        remove_from(&mut users, id)
    }
}

/// Thread-safe in-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    current: Arc<RwLock<Option<UserId>>>,
}

impl InMemorySessionStore {
    /// Creates a store with no signed-in user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn current(&self) -> UserRepositoryResult<Option<UserId>> {
        let current = self.current.read().map_err(poisoned)?;
        Ok(current.clone())
    }

    async fn begin(&self, user_id: &UserId) -> UserRepositoryResult<()> {
        let mut current = self.current.write().map_err(poisoned)?;
        *current = Some(user_id.clone());
        Ok(())
    }

    async fn end(&self) -> UserRepositoryResult<()> {
        let mut current = self.current.write().map_err(poisoned)?;
        *current = None;
        Ok(())
    }
}
