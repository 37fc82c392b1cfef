//! Error types for entity construction

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building typed entities from external data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An identifier was empty or whitespace-only
    #[error("Empty {kind} identifier")]
    EmptyIdentifier { kind: &'static str },

    /// A timestamp string could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identifier_display() {
        let err = CoreError::EmptyIdentifier { kind: "record" };
        assert_eq!(err.to_string(), "Empty record identifier");
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let err = CoreError::InvalidTimestamp("yesterday".to_string());
        assert!(err.to_string().contains("yesterday"));
    }
}
