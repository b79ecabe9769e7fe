//! Role-gated task status transitions.
//!
//! The [`TransitionAuthorizer`] answers whether a role may move a task from
//! one [`StatusKey`](crate::status::StatusKey) to another. It is a pure
//! lookup over an immutable [`TransitionTable`] and never fails. Unparseable
//! input and gaps in the table both degrade to "no permitted destination".
//!
//! Enforcement belongs to the caller. The task service consults the
//! authorizer before persisting a status change and rejects the change when
//! the answer is `false`.

mod authorizer;
mod role;
mod table;

pub use authorizer::TransitionAuthorizer;
pub use role::{ParseRoleError, Role};
pub use table::{TransitionTable, TransitionTableBuilder};
