//! Key-value persistence for tracker state.
//!
//! State is stored as JSON documents under a handful of string keys, one
//! key per collection. The [`ports::KeyValueStore`] contract is satisfied by
//! an in-memory adapter for tests and short-lived sessions and by a
//! directory-backed adapter for state that must survive restarts.

pub mod adapters;
mod collection;
pub mod ports;

pub use collection::JsonCollection;

/// Key holding the persisted user collection.
pub const USERS_KEY: &str = "users";
/// Key holding the persisted project collection.
pub const PROJECTS_KEY: &str = "projects";
/// Key holding the persisted task collection.
pub const TASKS_KEY: &str = "tasks";
/// Key holding the signed-in user.
pub const SESSION_KEY: &str = "user";
