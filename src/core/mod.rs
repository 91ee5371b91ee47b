//! Core types shared across the crate

pub mod error;

pub use error::{PermissionError, PermissionResult};
