//! Status registry for task lifecycle states.
//!
//! Holds the closed catalog of canonical [`StatusKey`] values and the
//! persisted [`StatusEntry`] collection that maps storage identifiers onto
//! them. Lookups never fail: unknown keys fall back to a sentinel display
//! name and unknown identifiers resolve to `None`.

mod entry;
mod key;
mod registry;
mod style;

pub use entry::{StatusEntry, StatusId};
pub use key::{ParseStatusKeyError, StatusKey, UNKNOWN_STATUS_NAME};
pub use registry::{StatusRegistry, StatusRegistryError, resolve};
pub use style::StatusStyle;
