// crates/sync-engine/src/store.rs
//! Interfaces to the two external stores
//!
//! Implementations convert their wire formats into the typed entities of
//! `leadsync-core` before returning; the engine only ever sees those.

use crate::error::StoreResult;
use leadsync_core::{BoardItem, ItemId, ListId, NewItem, Record, RecordId, Status};

/// The structured-property side (records with a status)
pub trait RecordStore: Send + Sync {
    /// Returns the current snapshot of all records
    fn list_records(&self) -> StoreResult<Vec<Record>>;

    /// Sets the status of a record
    fn update_status(&self, id: &RecordId, status: &Status) -> StoreResult<()>;

    /// Stores the link from a record to its board item
    fn set_external_ref(&self, id: &RecordId, item: &ItemId) -> StoreResult<()>;
}

/// The list-based side (cards placed in lists)
pub trait BoardStore: Send + Sync {
    /// Returns the current snapshot of all items on the board
    fn list_items(&self) -> StoreResult<Vec<BoardItem>>;

    /// Creates an item and returns the id assigned by the board
    fn create_item(&self, request: &NewItem) -> StoreResult<ItemId>;

    /// Moves an item to another list
    fn move_item(&self, id: &ItemId, list: &ListId) -> StoreResult<()>;
}
