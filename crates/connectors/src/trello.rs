// crates/connectors/src/trello.rs

use crate::error::{store_error, ConnectorError, ConnectorResult};
use leadsync_core::{BoardItem, ItemId, ListId, NewItem, Timestamp};
use leadsync_network::{Client, ClientConfig, Method};
use leadsync_sync_engine::{BoardStore, StoreError, StoreResult};
use serde::Deserialize;
use serde_json::Value;

/// Credentials and board for the Trello API
#[derive(Debug, Clone)]
pub struct TrelloSettings {
    pub key: String,
    pub token: String,
    pub board_id: String,
}

/// Trello board exposed as the board store
pub struct TrelloBoardStore {
    base_url: String,
    settings: TrelloSettings,
    client: Client,
}

impl TrelloBoardStore {
    const API_BASE: &'static str = "https://api.trello.com/1";
    const CARD_FIELDS: &'static str = "id,name,idList,dateLastActivity";

    pub fn new(settings: TrelloSettings, http: ClientConfig) -> ConnectorResult<Self> {
        for (field, value) in [
            ("key", &settings.key),
            ("token", &settings.token),
            ("board_id", &settings.board_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConnectorError::missing("trello", field));
            }
        }

        Ok(Self {
            base_url: Self::API_BASE.to_string(),
            settings,
            client: Client::with_config(http)?,
        })
    }

    /// Points the store at another API root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn cards_url(&self) -> String {
        format!("{}/boards/{}/cards", self.base_url, self.settings.board_id.trim())
    }

    fn card_url(&self, id: &ItemId) -> String {
        format!("{}/cards/{}", self.base_url, id)
    }

    fn auth(&self) -> [(&str, &str); 2] {
        [
            ("key", self.settings.key.trim()),
            ("token", self.settings.token.trim()),
        ]
    }
}

impl BoardStore for TrelloBoardStore {
    fn list_items(&self) -> StoreResult<Vec<BoardItem>> {
        let [key, token] = self.auth();
        let query = [key, token, ("fields", Self::CARD_FIELDS)];

        let cards: Vec<TrelloCard> = self
            .client
            .get_json(&self.cards_url(), &query)
            .map_err(|e| store_error("board cards", e))?;

        let mut items = Vec::with_capacity(cards.len());
        for card in cards {
            match parse_card(card) {
                Ok(item) => items.push(item),
                Err(e) => log::warn!("Skipping Trello card: {}", e),
            }
        }

        log::debug!("Fetched {} cards from Trello", items.len());
        Ok(items)
    }

    fn create_item(&self, request: &NewItem) -> StoreResult<ItemId> {
        let [key, token] = self.auth();
        let query = [
            key,
            token,
            ("idList", request.list_id.as_str()),
            ("name", request.title.as_str()),
            ("desc", request.description.as_str()),
        ];

        // A retried create after a timeout can leave a second, unlinked card
        let card: TrelloCard = self
            .client
            .send_json_once::<_, ()>(Method::POST, &format!("{}/cards", self.base_url), &query, None)
            .map_err(|e| store_error("create card", e))?;

        ItemId::parse(&card.id)
            .map_err(|_| StoreError::Parse("created card has no id".to_string()))
    }

    fn move_item(&self, id: &ItemId, list: &ListId) -> StoreResult<()> {
        let [key, token] = self.auth();
        let query = [key, token, ("idList", list.as_str())];

        self.client
            .send_json::<Value, ()>(Method::PUT, &self.card_url(id), &query, None)
            .map(|_| ())
            .map_err(|e| store_error(&format!("card {}", id), e))
    }
}

/// A card as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub date_last_activity: Option<String>,
}

/// Converts a raw card into a typed board item
pub fn parse_card(card: TrelloCard) -> StoreResult<BoardItem> {
    let id = ItemId::parse(&card.id)
        .map_err(|_| StoreError::Parse("Trello card without an id".to_string()))?;
    let list_id = ListId::parse(&card.id_list)
        .map_err(|_| StoreError::Parse(format!("Trello card {} has no list", id)))?;

    Ok(BoardItem {
        id,
        name: card.name,
        list_id,
        last_activity: card
            .date_last_activity
            .as_deref()
            .and_then(Timestamp::parse_rfc3339),
    })
}
