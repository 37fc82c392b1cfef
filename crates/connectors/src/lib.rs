// crates/connectors/src/lib.rs
//! Notion and Trello adapters for the sync engine's store traits
//!
//! Raw API payloads are deserialized into the structs of each module and
//! converted into `leadsync-core` entities by `parse_page` / `parse_card`.

mod error;
mod notion;
mod trello;

pub use error::{ConnectorError, ConnectorResult};
pub use notion::{
    link_properties, parse_page, status_properties, NotionPage, NotionProperty,
    NotionQueryResponse, NotionRecordStore, NotionSchema, NotionSettings, StatusKind,
};
pub use trello::{parse_card, TrelloBoardStore, TrelloCard, TrelloSettings};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectorError::InvalidSetting {
            connector: "trello",
            field: "key",
            message: "must not be empty".to_string(),
        };
        assert!(err.to_string().contains("trello setting 'key'"));
    }

    #[test]
    fn test_default_schema_matches_lead_database() {
        let schema = NotionSchema::default();
        assert_eq!(schema.name_property, "Name");
        assert_eq!(schema.status_kind, StatusKind::Select);
        assert_eq!(schema.link_property, "TrelloCardID");
    }
}
