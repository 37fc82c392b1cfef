//! Error types for the configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong while locating, reading or writing `config.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot replace config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not valid TOML for [`crate::Config`]
    #[error("Config file {path} is not valid: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// One or more fields failed validation; the message lists all of them
    #[error("Invalid config: {0}")]
    ValidationError(String),

    #[error("Cannot create config directory {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No explicit path was given and the platform has no config directory
    #[error("No usable config location: {reason}")]
    PathResolutionError { reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Builds a `ValidationError` variant from collected field errors
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        ConfigError::ValidationError(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "sync.grace_seconds")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("notion.token", "must not be empty");
        assert_eq!(err.to_string(), "Field 'notion.token': must not be empty");
    }

    #[test]
    fn test_validation_error_with_value() {
        let err = ValidationError::with_value(
            "sync.interval_seconds",
            "must be between 10 and 86400",
            "5",
        );
        assert_eq!(
            err.to_string(),
            "Field 'sync.interval_seconds': must be between 10 and 86400 (got: 5)"
        );
    }

    #[test]
    fn test_from_validation_joins_messages() {
        let err = ConfigError::from_validation(&[
            ValidationError::new("a", "bad"),
            ValidationError::new("b", "worse"),
        ]);
        let text = err.to_string();
        assert!(text.contains("'a': bad; Field 'b': worse"));
    }
}
