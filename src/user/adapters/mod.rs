//! Adapter implementations of the user ports.

pub mod key_value;
pub mod memory;

pub use key_value::{KeyValueSessionStore, KeyValueUserRepository};
pub use memory::{InMemorySessionStore, InMemoryUserRepository};

use crate::user::{
    domain::{User, UserId},
    ports::{UserRepositoryError, UserRepositoryResult},
};

/// Replaces the user with the same id or appends it, rejecting email clashes.
fn upsert_into(users: &mut Vec<User>, user: &User) -> UserRepositoryResult<()> {
    if users
        .iter()
        .any(|existing| existing.id() != user.id() && existing.email() == user.email())
    {
        return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
    }
    match users.iter_mut().find(|existing| existing.id() == user.id()) {
        Some(slot) => *slot = user.clone(),
        None => users.push(user.clone()),
    }
    Ok(())
}

fn remove_from(users: &mut Vec<User>, id: &UserId) -> UserRepositoryResult<()> {
    let before = users.len();
    users.retain(|user| user.id() != id);
    if users.len() == before {
        return Err(UserRepositoryError::NotFound(id.clone()));
    }
    Ok(())
}
