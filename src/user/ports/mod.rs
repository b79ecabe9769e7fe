//! Port contracts for user accounts and sessions.

pub mod repository;
pub mod session;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use session::SessionStore;
