//! Application services for registration and sign-in.

mod auth;

pub use auth::{AuthError, AuthResult, AuthService, RegisterUserRequest};
