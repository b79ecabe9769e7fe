//! Domain model for user accounts.

mod email;
mod error;
mod ids;
mod password;
mod user;

pub use email::EmailAddress;
pub use error::UserDomainError;
pub use ids::UserId;
pub use password::PasswordDigest;
pub use user::User;
