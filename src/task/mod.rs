//! Tasks, their comments, and role-gated status changes.
//!
//! Tasks belong to a project and store their status as a registry
//! identifier. Status changes are resolved to canonical keys and checked
//! against the transition table for every role the actor holds before the
//! new identifier is written. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
