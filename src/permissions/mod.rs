//! Permission system for namespace paths
//!
//! A permission is a signed, colon-separated namespace path such as
//! `+:files:read` or `-:files:*`. This module provides:
//!
//! - [`Permission`]: the value type and its text encoding
//! - [`matches`]: whether one permission's path covers another's
//! - [`PermissionManager`] and [`authorize`]: first-match-wins evaluation of an
//!   ordered rule chain, denying when no rule matches
//!
//! # Matching
//!
//! | Pattern | Target | Matches |
//! |---------|--------|---------|
//! | `*` | `a`, `a:b`, `a:b:c` | yes |
//! | `a:*` | `a:c` | yes |
//! | `a:*` | `b` | no |
//! | `*:c` | `a:c` | yes |
//! | `*:*` | `b` | no (pattern longer than target) |
//! | `a` | `a:b:c` | yes (prefix) |
//!
//! # Example
//!
//! ```
//! use nsperm::{Permission, PermissionManager};
//!
//! let manager = PermissionManager::from_strs(["-:files:secret", "+:files"]).unwrap();
//!
//! assert!(manager.authorize(&Permission::parse("files:readme").unwrap()));
//! assert!(!manager.authorize(&Permission::parse("files:secret:key").unwrap()));
//! assert!(!manager.authorize(&Permission::parse("network").unwrap()));
//! ```

mod manager;
mod matcher;
mod permission;

pub use manager::{authorize, PermissionManager};
pub use matcher::matches;
pub use permission::{Permission, SEPARATOR, WILDCARD};
