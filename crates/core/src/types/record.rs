//! Record-store entities

use crate::types::{ItemId, RecordId, Status, Timestamp};
use serde::{Deserialize, Serialize};

/// A lead on the record-store side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    /// Display name, may be empty
    pub name: String,
    /// `None` means unclassified; such records are never synced
    pub status: Option<Status>,
    /// Link to the board item, written once by the engine
    pub external_ref: Option<ItemId>,
    pub last_modified: Option<Timestamp>,
}

impl Record {
    /// Title used for records with an empty name
    pub const PLACEHOLDER_TITLE: &'static str = "(No Name)";

    /// Creates an unclassified, unlinked record
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: None,
            external_ref: None,
            last_modified: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_external_ref(mut self, item: impl Into<ItemId>) -> Self {
        self.external_ref = Some(item.into());
        self
    }

    pub fn with_last_modified(mut self, at: Timestamp) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Returns true if the record has a status
    pub fn is_classified(&self) -> bool {
        self.status.is_some()
    }

    /// Returns true if the record already points at a board item
    pub fn is_linked(&self) -> bool {
        self.external_ref.is_some()
    }

    /// Name to show on the board, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            Self::PLACEHOLDER_TITLE
        } else {
            trimmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unclassified_and_unlinked() {
        let record = Record::new(RecordId::from("rec-1"), "Grace Hopper");
        assert!(!record.is_classified());
        assert!(!record.is_linked());
        assert!(record.last_modified.is_none());
    }

    #[test]
    fn test_builders() {
        let record = Record::new(RecordId::from("rec-1"), "Grace Hopper")
            .with_status("New")
            .with_external_ref("card-9")
            .with_last_modified(Timestamp::from_seconds(10));

        assert_eq!(record.status, Some(Status::from("New")));
        assert_eq!(record.external_ref, Some(ItemId::from("card-9")));
        assert_eq!(record.last_modified, Some(Timestamp::from_seconds(10)));
    }

    #[test]
    fn test_display_name_placeholder() {
        let record = Record::new(RecordId::from("rec-1"), "  ");
        assert_eq!(record.display_name(), "(No Name)");

        let named = Record::new(RecordId::from("rec-2"), " Alan ");
        assert_eq!(named.display_name(), "Alan");
    }
}
