//! Error types for permission handling

use thiserror::Error;

/// Errors produced while decoding permissions
///
/// Matching and evaluation never fail; only text decoding does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The text is not a valid permission (empty segment or no segments)
    #[error("permission: invalid syntax")]
    InvalidSyntax,
}

/// Result alias for permission operations
pub type PermissionResult<T> = std::result::Result<T, PermissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            PermissionError::InvalidSyntax.to_string(),
            "permission: invalid syntax"
        );
    }
}
