//! Registration, sign-in, and session lookup.

use crate::authorization::Role;
use crate::user::{
    domain::{EmailAddress, PasswordDigest, User, UserDomainError, UserId},
    ports::{SessionStore, UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    password: String,
    roles: Vec<Role>,
}

impl RegisterUserRequest {
    /// Creates a request with the required credentials and no roles.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            roles: Vec::new(),
        }
    }

    /// Sets the roles granted to the new user.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }
}

/// Service-level errors for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(EmailAddress),
    /// The email and password do not match a user.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Registration and sign-in orchestration service.
#[derive(Clone)]
pub struct AuthService<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    users: Arc<R>,
    session: Arc<S>,
}

impl<R, S> AuthService<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(users: Arc<R>, session: Arc<S>) -> Self {
        Self { users, session }
    }

    /// Registers a user and signs them in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] when the name, email, password, or role
    /// set is invalid, [`AuthError::EmailTaken`] when the address is already
    /// registered, or [`AuthError::Repository`] when persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> AuthResult<User> {
        let RegisterUserRequest {
            name,
            email,
            password,
            roles,
        } = request;

        let email = EmailAddress::new(email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "registration rejected: email already registered");
            return Err(AuthError::EmailTaken(email));
        }

        let digest = PasswordDigest::hash(&password)?;
        let user = User::new(name, email, digest, roles)?;
        self.users.upsert(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateEmail(taken) => AuthError::EmailTaken(taken),
            other => AuthError::Repository(other),
        })?;
        self.session.begin(user.id()).await?;
        info!(user_id = %user.id(), roles = ?user.roles(), "user registered");
        Ok(user)
    }

    /// Signs in the user holding `email` when `password` matches.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the address is
    /// malformed, unknown, or the password does not match, or
    /// [`AuthError::Repository`] when persistence fails.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let Ok(email) = EmailAddress::new(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|candidate| candidate.verify_password(password));
        let Some(user) = user else {
            warn!(email = %email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        self.session.begin(user.id()).await?;
        info!(user_id = %user.id(), "user signed in");
        Ok(user)
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] when the session cannot be cleared.
    pub async fn logout(&self) -> AuthResult<()> {
        self.session.end().await?;
        info!("user signed out");
        Ok(())
    }

    /// Returns the signed-in user.
    ///
    /// A session naming a user that no longer exists reads as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] when persistence lookup fails.
    pub async fn current_user(&self) -> AuthResult<Option<User>> {
        let Some(user_id) = self.session.current().await? else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(&user_id).await?)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] when persistence lookup fails.
    pub async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Returns every user holding the manager role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] when persistence lookup fails.
    pub async fn managers(&self) -> AuthResult<Vec<User>> {
        let users = self.users.list().await?;
        Ok(users
            .into_iter()
            .filter(|user| user.has_role(Role::Manager))
            .collect())
    }
}
