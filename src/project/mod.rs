//! Projects grouping tasks under one or more managers.
//!
//! Only managers create projects, and only a project's own managers edit or
//! delete it. Deleting a project deletes its tasks.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
