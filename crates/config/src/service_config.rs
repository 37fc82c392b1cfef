//! Notion, Trello and HTTP client sections

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Accepted values for `notion.status_kind`
pub const STATUS_KINDS: [&str; 2] = ["select", "status"];

/// Notion database holding the leads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotionConfig {
    pub database_id: String,
    pub token: String,
    /// Value of the `Notion-Version` header
    pub api_version: String,
    pub name_property: String,
    pub status_property: String,
    /// Shape of the status property: `select` or `status`
    pub status_kind: String,
    /// Rich-text property storing the linked card id
    pub link_property: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            database_id: String::new(),
            token: String::new(),
            api_version: "2022-06-28".to_string(),
            name_property: "Name".to_string(),
            status_property: "Status".to_string(),
            status_kind: "select".to_string(),
            link_property: "TrelloCardID".to_string(),
        }
    }
}

impl ConfigSection for NotionConfig {
    /// Credentials are not checked here; see `Config::check_runnable`
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::not_empty(&self.api_version, "notion.api_version"),
            Validator::not_empty(&self.name_property, "notion.name_property"),
            Validator::not_empty(&self.status_property, "notion.status_property"),
            Validator::not_empty(&self.link_property, "notion.link_property"),
            Validator::one_of(&self.status_kind, &STATUS_KINDS, "notion.status_kind"),
        ])
    }
}

/// Trello board holding the cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrelloConfig {
    pub board_id: String,
    pub key: String,
    pub token: String,
}

impl ConfigSection for TrelloConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }
}

/// Timeout and retry settings shared by both connectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub max_attempts: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 10_000,
        }
    }
}

impl ConfigSection for HttpConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::in_range(self.timeout_seconds, 1, 300, "http.timeout_seconds"),
            Validator::in_range(self.max_attempts, 1, 10, "http.max_attempts"),
            Validator::in_range(self.max_backoff_ms, 0, 600_000, "http.max_backoff_ms"),
        ];
        if self.initial_backoff_ms > self.max_backoff_ms {
            results.push(Err(ValidationError::with_value(
                "http.initial_backoff_ms",
                "must not exceed http.max_backoff_ms",
                self.initial_backoff_ms,
            )));
        }
        Validator::collect_errors(results)
    }
}
