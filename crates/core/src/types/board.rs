//! Board-side entities

use crate::types::{ItemId, ListId, Record, Timestamp};
use serde::{Deserialize, Serialize};

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: ItemId,
    pub name: String,
    /// Current list placement, always present
    pub list_id: ListId,
    pub last_activity: Option<Timestamp>,
}

impl BoardItem {
    /// Creates an item with no name and no recorded activity
    pub fn new(id: ItemId, list_id: ListId) -> Self {
        Self {
            id,
            name: String::new(),
            list_id,
            last_activity: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_last_activity(mut self, at: Timestamp) -> Self {
        self.last_activity = Some(at);
        self
    }
}

/// Request to create a board item for a record that has no counterpart yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    /// Free-form metadata; carries the originating record id
    pub description: String,
    pub list_id: ListId,
}

impl NewItem {
    /// Builds the creation request for `record`, placed in `list_id`
    pub fn for_record(record: &Record, list_id: ListId) -> Self {
        Self {
            title: record.display_name().to_string(),
            description: format!("Lead ID: {}", record.id),
            list_id,
        }
    }
}
