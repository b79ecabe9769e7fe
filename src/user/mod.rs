//! User accounts and authentication.
//!
//! Users carry a set of [`Role`](crate::authorization::Role)s and an argon2
//! password digest. The module follows the same hexagonal split as the rest
//! of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
