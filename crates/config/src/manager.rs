//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel, StatusMapping};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Board list variables and the lead status each one stands for
///
/// Used to build a status map when the file does not define one.
pub const ENV_LIST_DEFAULTS: [(&str, &str); 4] = [
    ("TRELLO_LIST_TODO", "New"),
    ("TRELLO_LIST_INPROGRESS", "Contacted"),
    ("TRELLO_LIST_DONE", "Qualified"),
    ("TRELLO_LIST_LOST", "Lost"),
];

/// Main configuration manager
///
/// This is the primary interface for loading, saving, and initializing
/// configuration. It handles file paths, defaults, and validation.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/leadsync/`
    /// - macOS: `~/Library/Application Support/leadsync/`
    /// - Windows: `%APPDATA%\leadsync\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        Self::with_file(config_dir.join("config.toml"))
    }

    /// Creates a config manager for an explicit config file
    pub fn with_file(config_path: PathBuf) -> ConfigResult<Self> {
        if config_path.as_os_str().is_empty() {
            return Err(ConfigError::PathResolutionError {
                reason: "Config path is empty".to_string(),
            });
        }

        Ok(Self {
            persistence: ConfigPersistence::new(config_path.clone()),
            config_path,
        })
    }

    /// Returns the default config directory based on the platform
    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "leadsync")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Writes the commented default config file
    ///
    /// Returns Ok(true) if a file was written, Ok(false) if one already
    /// exists and `force` is false.
    pub fn initialize(&self, force: bool) -> ConfigResult<bool> {
        if self.config_path.exists() && !force {
            log::info!(
                "Config file already exists at {}",
                self.config_path.display()
            );
            return Ok(false);
        }

        self.persistence.generate_default_with_comments()?;
        Ok(true)
    }

    /// Loads the file and applies process environment overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        Self::apply_overrides(&mut config, |name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies overrides from `lookup` (an environment variable reader)
    ///
    /// Recognised variables: `NOTION_TOKEN`, `NOTION_DATABASE_ID`,
    /// `TRELLO_KEY`, `TRELLO_TOKEN`, `TRELLO_BOARD_ID`,
    /// `LEADSYNC_GRACE_SECONDS`, `LEADSYNC_LOG_LEVEL`, and the
    /// [`ENV_LIST_DEFAULTS`] list variables when no status map is configured.
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let strings = [
            ("NOTION_TOKEN", &mut config.notion.token),
            ("NOTION_DATABASE_ID", &mut config.notion.database_id),
            ("TRELLO_KEY", &mut config.trello.key),
            ("TRELLO_TOKEN", &mut config.trello.token),
            ("TRELLO_BOARD_ID", &mut config.trello.board_id),
        ];
        for (name, field) in strings {
            if let Some(value) = get(name) {
                *field = value.trim().to_string();
            }
        }

        if let Some(grace) = get("LEADSYNC_GRACE_SECONDS") {
            match grace.trim().parse::<u64>() {
                Ok(seconds) => config.sync.grace_seconds = seconds,
                Err(_) => log::warn!("Ignoring invalid LEADSYNC_GRACE_SECONDS '{}'", grace),
            }
        }

        if let Some(level) = get("LEADSYNC_LOG_LEVEL") {
            match level.parse::<LogLevel>() {
                Ok(level) => config.app.log_level = level,
                Err(e) => log::warn!("Ignoring LEADSYNC_LOG_LEVEL: {}", e),
            }
        }

        if config.sync.status_map.is_empty() {
            config.sync.status_map = ENV_LIST_DEFAULTS
                .iter()
                .filter_map(|(var, status)| {
                    get(*var).map(|list| StatusMapping::new(*status, list.trim()))
                })
                .collect();
            if !config.sync.status_map.is_empty() {
                log::debug!(
                    "Using {} status mappings from TRELLO_LIST_* variables",
                    config.sync.status_map.len()
                );
            }
        }

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {}",
                ConfigError::from_validation(&errors)
            );
        }
    }
}
