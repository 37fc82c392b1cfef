//! Reconciliation settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Largest accepted grace window and watch interval (one day)
pub const MAX_SECONDS: u64 = 86_400;

/// Shortest accepted watch interval
pub const MIN_INTERVAL_SECONDS: u64 = 10;

/// One `status ↔ list` pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMapping {
    pub status: String,
    pub list_id: String,
}

impl StatusMapping {
    pub fn new(status: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            list_id: list_id.into(),
        }
    }
}

/// Sync engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// How much newer a board edit must be to beat the record
    pub grace_seconds: u64,

    /// Pause between runs in watch mode
    pub interval_seconds: u64,

    /// Status to list pairs; must be one-to-one
    pub status_map: Vec<StatusMapping>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            grace_seconds: 30,
            interval_seconds: 300,
            status_map: Vec::new(),
        }
    }
}

impl ConfigSection for SyncConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::in_range(self.grace_seconds, 0, MAX_SECONDS, "sync.grace_seconds"),
            Validator::in_range(
                self.interval_seconds,
                MIN_INTERVAL_SECONDS,
                MAX_SECONDS,
                "sync.interval_seconds",
            ),
        ];

        let mut statuses = HashSet::new();
        let mut lists = HashSet::new();
        for (i, mapping) in self.status_map.iter().enumerate() {
            let status_field = format!("sync.status_map[{}].status", i);
            let list_field = format!("sync.status_map[{}].list_id", i);

            results.push(Validator::not_empty(&mapping.status, &status_field));
            results.push(Validator::not_empty(&mapping.list_id, &list_field));

            results.push(Validator::unique(
                &mut statuses,
                &mapping.status,
                &status_field,
                "status",
            ));
            results.push(Validator::unique(&mut lists, &mapping.list_id, &list_field, "list"));
        }

        Validator::collect_errors(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SyncConfig::default().validate().is_ok());
    }

    #[test]
    fn test_interval_bounds() {
        let mut config = SyncConfig::default();
        config.interval_seconds = 5;
        assert!(config.validate().is_err());

        config.interval_seconds = MAX_SECONDS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grace_upper_bound() {
        let mut config = SyncConfig::default();
        config.grace_seconds = 0;
        assert!(config.validate().is_ok());

        config.grace_seconds = MAX_SECONDS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_bijective_map_rejected() {
        let mut config = SyncConfig::default();
        config.status_map = vec![
            StatusMapping::new("New", "list-a"),
            StatusMapping::new("Contacted", "list-a"),
            StatusMapping::new("New", "list-b"),
        ];

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message.contains("list is mapped")));
        assert!(errors.iter().any(|e| e.message.contains("status is mapped")));
    }

    #[test]
    fn test_blank_mapping_rejected() {
        let mut config = SyncConfig::default();
        config.status_map = vec![StatusMapping::new("New", " ")];
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "sync.status_map[0].list_id");
    }
}
