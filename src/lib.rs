//! Taskboard: a project and task tracker with role-gated status changes.
//!
//! Projects group tasks under one or more managers. Each task carries a
//! status drawn from a fixed catalog; who may move a task between statuses
//! is decided by a declarative transition table keyed by role.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, key-value)
//!
//! # Modules
//!
//! - [`status`]: Canonical status keys and the identifier registry
//! - [`authorization`]: Roles, the transition table, and the authorizer
//! - [`user`]: Accounts, password hashing, and sessions
//! - [`project`]: Projects and their managers
//! - [`task`]: Tasks, comments, and status changes
//! - [`storage`]: Key-value persistence
//! - [`config`]: Data directory and seed settings
//! - [`seed`]: Bundled starter data
//! - [`tracker`]: Wiring of store, policy, and services

pub mod authorization;
pub mod config;
pub mod project;
pub mod seed;
pub mod status;
pub mod storage;
pub mod task;
pub mod tracker;
pub mod user;
