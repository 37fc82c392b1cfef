//! LeadSync configuration system
//!
//! Each part of the tool defines its settings as a type implementing
//! `ConfigSection`; `Config` is the root that ties them together.
//!
//! Values are layered: defaults < `config.toml` < environment variables
//! (see [`ConfigManager::load_with_env_overrides`]) < command-line flags.
//! Files are written atomically and never left half-written.
//!
//! # Example
//!
//! ```rust
//! use leadsync_config::{Config, ConfigManager};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let manager = ConfigManager::with_directory(dir.path().to_path_buf()).unwrap();
//! let config = manager.load().unwrap();
//!
//! assert_eq!(config.sync.grace_seconds, 30);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod service_config;
mod sync_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, ENV_LIST_DEFAULTS};
pub use validation::{ConfigSection, Validator};

// Re-export config sections
pub use app_config::{AppConfig, LogLevel};
pub use service_config::{HttpConfig, NotionConfig, TrelloConfig, STATUS_KINDS};
pub use sync_config::{StatusMapping, SyncConfig};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Reconciliation settings
    pub sync: SyncConfig,

    /// Record store connection
    pub notion: NotionConfig,

    /// Board store connection
    pub trello: TrelloConfig,

    /// HTTP timeout and retry
    pub http: HttpConfig,
}

impl Config {
    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let sections = [
            self.app.validate(),
            self.sync.validate(),
            self.notion.validate(),
            self.trello.validate(),
            self.http.validate(),
        ];
        for result in sections {
            if let Err(mut e) = result {
                errors.append(&mut e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates everything a sync run needs, including credentials
    ///
    /// Credentials usually come from the environment, so a file without them
    /// is still valid for `validate`.
    pub fn check_runnable(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.validate().err().unwrap_or_default();

        let required = [
            (&self.notion.token, "notion.token"),
            (&self.notion.database_id, "notion.database_id"),
            (&self.trello.key, "trello.key"),
            (&self.trello.token, "trello.token"),
            (&self.trello.board_id, "trello.board_id"),
        ];
        for (value, field) in required {
            if let Err(e) = Validator::not_empty(value, field) {
                errors.push(e);
            }
        }

        if self.sync.status_map.is_empty() {
            errors.push(ValidationError::new(
                "sync.status_map",
                "at least one status must be mapped to a list",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            sync: SyncConfig::default(),
            notion: NotionConfig::default(),
            trello: TrelloConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runnable() -> Config {
        let mut config = Config::default();
        config.notion.token = "secret".to_string();
        config.notion.database_id = "db".to_string();
        config.trello.key = "key".to_string();
        config.trello.token = "token".to_string();
        config.trello.board_id = "board".to_string();
        config.sync.status_map = vec![StatusMapping::new("New", "list-todo")];
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_is_not_runnable() {
        let errors = Config::default().check_runnable().unwrap_err();
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_complete_config_is_runnable() {
        assert!(runnable().check_runnable().is_ok());
    }

    #[test]
    fn test_runnable_includes_section_errors() {
        let mut config = runnable();
        config.http.max_attempts = 0;
        assert_eq!(config.check_runnable().unwrap_err().len(), 1);
    }

    #[test]
    fn test_config_version_is_set() {
        assert_eq!(Config::default().version, CONFIG_VERSION);
    }
}
