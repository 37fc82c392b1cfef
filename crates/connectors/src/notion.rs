// crates/connectors/src/notion.rs

use crate::error::{store_error, ConnectorError, ConnectorResult};
use leadsync_core::{ItemId, Record, RecordId, Status, Timestamp};
use leadsync_network::{Client, ClientConfig, Method};
use leadsync_sync_engine::{RecordStore, StoreError, StoreResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Shape of the database's status property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// A `select` property
    Select,
    /// A native `status` property
    Status,
}

impl StatusKind {
    fn key(self) -> &'static str {
        match self {
            StatusKind::Select => "select",
            StatusKind::Status => "status",
        }
    }
}

impl FromStr for StatusKind {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(StatusKind::Select),
            "status" => Ok(StatusKind::Status),
            other => Err(ConnectorError::InvalidSetting {
                connector: "notion",
                field: "status_kind",
                message: format!("expected 'select' or 'status', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Property names and types of the leads database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionSchema {
    pub name_property: String,
    pub status_property: String,
    pub status_kind: StatusKind,
    pub link_property: String,
}

impl Default for NotionSchema {
    fn default() -> Self {
        Self {
            name_property: "Name".to_string(),
            status_property: "Status".to_string(),
            status_kind: StatusKind::Select,
            link_property: "TrelloCardID".to_string(),
        }
    }
}

/// Connection settings for a Notion database
#[derive(Debug, Clone)]
pub struct NotionSettings {
    pub token: String,
    pub database_id: String,
    pub api_version: String,
    pub schema: NotionSchema,
}

/// Notion database exposed as the record store
pub struct NotionRecordStore {
    base_url: String,
    database_id: String,
    schema: NotionSchema,
    client: Client,
}

impl NotionRecordStore {
    const API_BASE: &'static str = "https://api.notion.com/v1";
    const PAGE_SIZE: u32 = 100;

    /// Builds the store; `http` supplies timeout and retry settings
    pub fn new(settings: NotionSettings, http: ClientConfig) -> ConnectorResult<Self> {
        if settings.token.trim().is_empty() {
            return Err(ConnectorError::missing("notion", "token"));
        }
        if settings.database_id.trim().is_empty() {
            return Err(ConnectorError::missing("notion", "database_id"));
        }

        let config = http
            .with_header("Authorization", format!("Bearer {}", settings.token.trim()))
            .with_header("Notion-Version", settings.api_version.clone());

        Ok(Self {
            base_url: Self::API_BASE.to_string(),
            database_id: settings.database_id.trim().to_string(),
            schema: settings.schema,
            client: Client::with_config(config)?,
        })
    }

    /// Points the store at another API root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn schema(&self) -> &NotionSchema {
        &self.schema
    }

    fn query_url(&self) -> String {
        format!("{}/databases/{}/query", self.base_url, self.database_id)
    }

    fn page_url(&self, id: &RecordId) -> String {
        format!("{}/pages/{}", self.base_url, id)
    }

    fn patch_page(&self, id: &RecordId, properties: Value) -> StoreResult<()> {
        let body = json!({ "properties": properties });
        self.client
            .send_json::<Value, _>(Method::PATCH, &self.page_url(id), &[], Some(&body))
            .map(|_| ())
            .map_err(|e| store_error(&format!("page {}", id), e))
    }
}

impl RecordStore for NotionRecordStore {
    fn list_records(&self) -> StoreResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": Self::PAGE_SIZE });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response: NotionQueryResponse = self
                .client
                .send_json(Method::POST, &self.query_url(), &[], Some(&body))
                .map_err(|e| store_error("database query", e))?;

            for page in response.results {
                match parse_page(page, &self.schema) {
                    Ok(record) => records.push(record),
                    Err(e) => log::warn!("Skipping Notion page: {}", e),
                }
            }

            match response.next_cursor {
                Some(next) if response.has_more => cursor = Some(next),
                _ => break,
            }
        }

        log::debug!("Fetched {} records from Notion", records.len());
        Ok(records)
    }

    fn update_status(&self, id: &RecordId, status: &Status) -> StoreResult<()> {
        self.patch_page(id, status_properties(&self.schema, status))
    }

    fn set_external_ref(&self, id: &RecordId, item: &ItemId) -> StoreResult<()> {
        self.patch_page(id, link_properties(&self.schema, item))
    }
}

/// Properties payload that sets the status in the configured shape
pub fn status_properties(schema: &NotionSchema, status: &Status) -> Value {
    let mut property = serde_json::Map::new();
    property.insert(
        schema.status_kind.key().to_string(),
        json!({ "name": status.as_str() }),
    );

    let mut properties = serde_json::Map::new();
    properties.insert(schema.status_property.clone(), Value::Object(property));
    Value::Object(properties)
}

/// Properties payload that stores the board item id as rich text
pub fn link_properties(schema: &NotionSchema, item: &ItemId) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        schema.link_property.clone(),
        json!({ "rich_text": [{ "text": { "content": item.as_str() } }] }),
    );
    Value::Object(properties)
}

/// Response of a database query
#[derive(Debug, Deserialize)]
pub struct NotionQueryResponse {
    #[serde(default)]
    pub results: Vec<NotionPage>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row as returned by the API
#[derive(Debug, Deserialize)]
pub struct NotionPage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, NotionProperty>,
}

/// The property shapes the connector reads; others are ignored
#[derive(Debug, Default, Deserialize)]
pub struct NotionProperty {
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    #[serde(default)]
    pub rich_text: Option<Vec<RichText>>,
    #[serde(default)]
    pub select: Option<NamedOption>,
    #[serde(default)]
    pub status: Option<NamedOption>,
}

#[derive(Debug, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedOption {
    #[serde(default)]
    pub name: String,
}

fn plain_text(fragments: Option<&Vec<RichText>>) -> String {
    fragments
        .map(|parts| parts.iter().map(|p| p.plain_text.as_str()).collect::<String>())
        .unwrap_or_default()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Converts a raw page into a typed record
///
/// Missing or malformed optional properties become `None`; only a page
/// without an id is rejected.
pub fn parse_page(page: NotionPage, schema: &NotionSchema) -> StoreResult<Record> {
    let id = RecordId::parse(&page.id)
        .map_err(|_| StoreError::Parse("Notion page without an id".to_string()))?;

    let name = page
        .properties
        .get(&schema.name_property)
        .map(|p| plain_text(p.title.as_ref()))
        .unwrap_or_default();

    let status = page
        .properties
        .get(&schema.status_property)
        .and_then(|p| match schema.status_kind {
            StatusKind::Select => p.select.as_ref(),
            StatusKind::Status => p.status.as_ref(),
        })
        .and_then(|option| non_blank(&option.name))
        .map(Status::from);

    let link = page
        .properties
        .get(&schema.link_property)
        .map(|p| plain_text(p.rich_text.as_ref()));
    let external_ref = link.as_deref().and_then(non_blank).map(ItemId::from);

    let last_modified = page
        .last_edited_time
        .as_deref()
        .and_then(Timestamp::parse_rfc3339);

    Ok(Record {
        id,
        name: name.trim().to_string(),
        status,
        external_ref,
        last_modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: Value) -> NotionPage {
        serde_json::from_value(value).unwrap()
    }

    fn full_page() -> Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "last_edited_time": "2024-03-01T12:30:00.000Z",
            "properties": {
                "Name": { "id": "title", "type": "title", "title": [
                    { "type": "text", "plain_text": "Ada " },
                    { "type": "text", "plain_text": "Lovelace" }
                ]},
                "Status": { "id": "abc", "type": "select", "select": { "id": "1", "name": "Contacted", "color": "blue" } },
                "Email": { "type": "email", "email": "ada@example.com" },
                "TrelloCardID": { "type": "rich_text", "rich_text": [{ "plain_text": "5f1e0c" }] }
            }
        })
    }

    #[test]
    fn test_parse_full_page() {
        let record = parse_page(page(full_page()), &NotionSchema::default()).unwrap();

        assert_eq!(record.id.as_str(), "59833787-2cf9-4fdf-8782-e53db20768a5");
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.status, Some(Status::from("Contacted")));
        assert_eq!(record.external_ref, Some(ItemId::from("5f1e0c")));
        assert_eq!(
            record.last_modified,
            Timestamp::parse_rfc3339("2024-03-01T12:30:00Z")
        );
    }

    #[test]
    fn test_parse_sparse_page() {
        let raw = json!({
            "id": "page-1",
            "last_edited_time": "not a date",
            "properties": {
                "Status": { "type": "select", "select": null },
                "TrelloCardID": { "type": "rich_text", "rich_text": [] }
            }
        });
        let record = parse_page(page(raw), &NotionSchema::default()).unwrap();

        assert_eq!(record.name, "");
        assert!(record.status.is_none());
        assert!(record.external_ref.is_none());
        assert!(record.last_modified.is_none());
    }

    #[test]
    fn test_parse_status_kind() {
        let raw = json!({
            "id": "page-1",
            "properties": {
                "Stage": { "type": "status", "status": { "name": "Qualified" } }
            }
        });
        let schema = NotionSchema {
            status_property: "Stage".to_string(),
            status_kind: StatusKind::Status,
            ..Default::default()
        };
        let record = parse_page(page(raw), &schema).unwrap();
        assert_eq!(record.status, Some(Status::from("Qualified")));

        let raw = json!({
            "id": "page-1",
            "properties": { "Stage": { "type": "status", "status": { "name": "Qualified" } } }
        });
        let select_schema = NotionSchema {
            status_property: "Stage".to_string(),
            ..Default::default()
        };
        assert!(parse_page(page(raw), &select_schema).unwrap().status.is_none());
    }

    #[test]
    fn test_page_without_id_is_rejected() {
        let result = parse_page(page(json!({ "properties": {} })), &NotionSchema::default());
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_status_payload_shapes() {
        let mut schema = NotionSchema::default();
        assert_eq!(
            status_properties(&schema, &Status::from("New")),
            json!({ "Status": { "select": { "name": "New" } } })
        );

        schema.status_kind = StatusKind::Status;
        assert_eq!(
            status_properties(&schema, &Status::from("New")),
            json!({ "Status": { "status": { "name": "New" } } })
        );
    }

    #[test]
    fn test_link_payload() {
        assert_eq!(
            link_properties(&NotionSchema::default(), &ItemId::from("card-1")),
            json!({ "TrelloCardID": { "rich_text": [{ "text": { "content": "card-1" } }] } })
        );
    }

    #[test]
    fn test_status_kind_from_str() {
        assert_eq!("select".parse::<StatusKind>().unwrap(), StatusKind::Select);
        assert_eq!(" Status ".parse::<StatusKind>().unwrap(), StatusKind::Status);
        assert!("multi_select".parse::<StatusKind>().is_err());
    }

    #[test]
    fn test_query_response_pagination_fields() {
        let response: NotionQueryResponse = serde_json::from_value(json!({
            "object": "list",
            "results": [full_page()],
            "has_more": true,
            "next_cursor": "cursor-2"
        }))
        .unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(response.has_more);
        assert_eq!(response.next_cursor.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn test_store_requires_credentials() {
        let settings = NotionSettings {
            token: String::new(),
            database_id: "db".to_string(),
            api_version: "2022-06-28".to_string(),
            schema: NotionSchema::default(),
        };
        assert!(NotionRecordStore::new(settings, ClientConfig::default()).is_err());
    }

    #[test]
    fn test_urls() {
        let settings = NotionSettings {
            token: "secret".to_string(),
            database_id: "db-1".to_string(),
            api_version: "2022-06-28".to_string(),
            schema: NotionSchema::default(),
        };
        let store = NotionRecordStore::new(settings, ClientConfig::default())
            .unwrap()
            .with_base_url("http://localhost:9/v1/");

        assert_eq!(store.query_url(), "http://localhost:9/v1/databases/db-1/query");
        assert_eq!(
            store.page_url(&RecordId::from("p-1")),
            "http://localhost:9/v1/pages/p-1"
        );
    }
}
