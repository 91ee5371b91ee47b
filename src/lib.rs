//! Hierarchical wildcard permission strings
//!
//! Parse `+:a:b` / `-:a:*` style permissions, test whether one covers
//! another, and decide requests against an ordered allow/deny rule chain.
//! Storing and loading rule sets is left to the caller.

pub mod core;
pub mod logging;
pub mod permissions;

pub use crate::core::{PermissionError, PermissionResult};
pub use permissions::{authorize, matches, Permission, PermissionManager};
