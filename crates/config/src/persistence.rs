//! File system persistence for configuration
//!
//! Reads and writes `config.toml` with:
//! - Atomic writes (temp file in the same directory, then rename)
//! - Directory creation
//! - Empty files treated as corrupted rather than as defaults

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Commented default written by `leadsync init`
///
/// Must parse to `Config::default()`.
const DEFAULT_TEMPLATE: &str = r#"# LeadSync configuration
#
# Secrets are usually supplied through the environment (or a .env file):
#   NOTION_TOKEN, NOTION_DATABASE_ID, TRELLO_KEY, TRELLO_TOKEN, TRELLO_BOARD_ID
# Values set there override the ones below.

version = 1

[app]
# error | warn | info | debug | trace  (RUST_LOG takes precedence)
log_level = "info"

[sync]
# A board edit must be newer than the record edit by more than this many
# seconds to win a conflict.
grace_seconds = 30
# Pause between runs for `leadsync watch`.
interval_seconds = 300

# One entry per lead status. Statuses and lists must be unique.
# When no entry is present, TRELLO_LIST_TODO, TRELLO_LIST_INPROGRESS,
# TRELLO_LIST_DONE and TRELLO_LIST_LOST map to New, Contacted, Qualified
# and Lost.
#
# [[sync.status_map]]
# status = "New"
# list_id = "<trello list id>"

[notion]
database_id = ""
token = ""
api_version = "2022-06-28"
name_property = "Name"
status_property = "Status"
# "select" or "status", matching the property type in the database.
status_kind = "select"
link_property = "TrelloCardID"

[trello]
board_id = ""
key = ""
token = ""

[http]
timeout_seconds = 30
max_attempts = 3
initial_backoff_ms = 500
max_backoff_ms = 10000
"#;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads configuration from file
    ///
    /// If the file doesn't exist, returns the default config.
    /// If the file is empty or cannot be parsed, returns an error.
    /// Validation problems are logged, not returned.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "Config version {} differs from supported version {}",
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings: {}",
                ConfigError::from_validation(&errors)
            );
        }

        Ok(config)
    }

    /// Writes the commented default config file
    pub fn generate_default_with_comments(&self) -> ConfigResult<()> {
        self.write_atomic(DEFAULT_TEMPLATE)?;
        log::info!("Generated default config at {}", self.config_path.display());
        Ok(())
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, content: &str) -> ConfigResult<()> {
        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.ensure_directory_exists(&dir)?;

        let mut temp_file = NamedTempFile::new_in(&dir).map_err(ConfigError::IoError)?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::IoError)?;
        temp_file.flush().map_err(ConfigError::IoError)?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}
