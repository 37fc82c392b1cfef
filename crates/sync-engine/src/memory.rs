// crates/sync-engine/src/memory.rs
//! In-memory stores for tests, demos and offline runs
//!
//! Both stores record every mutation call so callers can assert on exactly
//! what a run did. Mutations never touch timestamps.

use crate::error::{StoreError, StoreResult};
use crate::store::{BoardStore, RecordStore};
use leadsync_core::{BoardItem, ItemId, ListId, NewItem, Record, RecordId, Status};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A mutation issued against a memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    UpdateStatus { record: RecordId, status: Status },
    SetExternalRef { record: RecordId, item: ItemId },
    CreateItem { request: NewItem, assigned: ItemId },
    MoveItem { item: ItemId, list: ListId },
}

#[derive(Debug, Default)]
struct RecordState {
    records: Vec<Record>,
    calls: Vec<StoreCall>,
    failing: HashSet<String>,
    fail_listing: bool,
}

/// Record store backed by a vector
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    state: Arc<Mutex<RecordState>>,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordState {
                records,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecordState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current contents
    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    pub fn record(&self, id: &RecordId) -> Option<Record> {
        self.lock().records.iter().find(|r| &r.id == id).cloned()
    }

    /// Mutations issued so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Makes every mutation addressed to `id` fail with a transport error
    pub fn fail_on(&self, id: impl Into<String>) {
        self.lock().failing.insert(id.into());
    }

    /// Makes `list_records` fail
    pub fn fail_listing(&self, fail: bool) {
        self.lock().fail_listing = fail;
    }

    /// Inserts or replaces a record, as an external edit would
    pub fn upsert(&self, record: Record) {
        let mut state = self.lock();
        match state.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => state.records.push(record),
        }
    }

    fn mutate<F>(&self, id: &RecordId, call: StoreCall, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Record),
    {
        let mut state = self.lock();
        if state.failing.contains(id.as_str()) {
            return Err(StoreError::Transport(format!("injected failure for {}", id)));
        }
        let record = state
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        apply(record);
        state.calls.push(call);
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_records(&self) -> StoreResult<Vec<Record>> {
        let state = self.lock();
        if state.fail_listing {
            return Err(StoreError::Transport("record listing unavailable".to_string()));
        }
        Ok(state.records.clone())
    }

    fn update_status(&self, id: &RecordId, status: &Status) -> StoreResult<()> {
        let call = StoreCall::UpdateStatus {
            record: id.clone(),
            status: status.clone(),
        };
        self.mutate(id, call, |record| record.status = Some(status.clone()))
    }

    fn set_external_ref(&self, id: &RecordId, item: &ItemId) -> StoreResult<()> {
        let call = StoreCall::SetExternalRef {
            record: id.clone(),
            item: item.clone(),
        };
        self.mutate(id, call, |record| record.external_ref = Some(item.clone()))
    }
}

#[derive(Debug, Default)]
struct BoardState {
    items: Vec<BoardItem>,
    calls: Vec<StoreCall>,
    failing: HashSet<String>,
    fail_listing: bool,
    next_id: u64,
}

/// Board store backed by a vector; created items get ids `item-1`, `item-2`, ...
#[derive(Debug, Clone, Default)]
pub struct MemoryBoardStore {
    state: Arc<Mutex<BoardState>>,
}

impl MemoryBoardStore {
    pub fn new(items: Vec<BoardItem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState {
                items,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn items(&self) -> Vec<BoardItem> {
        self.lock().items.clone()
    }

    pub fn item(&self, id: &ItemId) -> Option<BoardItem> {
        self.lock().items.iter().find(|i| &i.id == id).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Makes mutations fail for an item id, or creation fail for a list id
    pub fn fail_on(&self, id: impl Into<String>) {
        self.lock().failing.insert(id.into());
    }

    pub fn fail_listing(&self, fail: bool) {
        self.lock().fail_listing = fail;
    }

    pub fn upsert(&self, item: BoardItem) {
        let mut state = self.lock();
        match state.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => state.items.push(item),
        }
    }

    /// Removes an item, as if it was deleted on the board
    pub fn remove(&self, id: &ItemId) -> Option<BoardItem> {
        let mut state = self.lock();
        let index = state.items.iter().position(|i| &i.id == id)?;
        Some(state.items.remove(index))
    }
}

impl BoardStore for MemoryBoardStore {
    fn list_items(&self) -> StoreResult<Vec<BoardItem>> {
        let state = self.lock();
        if state.fail_listing {
            return Err(StoreError::Transport("board listing unavailable".to_string()));
        }
        Ok(state.items.clone())
    }

    fn create_item(&self, request: &NewItem) -> StoreResult<ItemId> {
        let mut state = self.lock();
        if state.failing.contains(request.list_id.as_str()) {
            return Err(StoreError::Transport(format!(
                "injected failure for list {}",
                request.list_id
            )));
        }

        state.next_id += 1;
        let id = ItemId::from(format!("item-{}", state.next_id));
        state.items.push(
            BoardItem::new(id.clone(), request.list_id.clone()).with_name(request.title.clone()),
        );
        state.calls.push(StoreCall::CreateItem {
            request: request.clone(),
            assigned: id.clone(),
        });
        Ok(id)
    }

    fn move_item(&self, id: &ItemId, list: &ListId) -> StoreResult<()> {
        let mut state = self.lock();
        if state.failing.contains(id.as_str()) {
            return Err(StoreError::Transport(format!("injected failure for {}", id)));
        }
        let item = state
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.list_id = list.clone();
        state.calls.push(StoreCall::MoveItem {
            item: id.clone(),
            list: list.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_mutations_are_recorded() {
        let store = MemoryRecordStore::new(vec![Record::new(RecordId::from("rec-1"), "Ada")]);
        store
            .update_status(&RecordId::from("rec-1"), &Status::from("New"))
            .unwrap();

        assert_eq!(
            store.record(&RecordId::from("rec-1")).unwrap().status,
            Some(Status::from("New"))
        );
        assert_eq!(store.calls().len(), 1);
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let store = MemoryRecordStore::default();
        let err = store
            .set_external_ref(&RecordId::from("ghost"), &ItemId::from("card-1"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_created_ids_are_sequential() {
        let store = MemoryBoardStore::default();
        let request = NewItem {
            title: "Ada".to_string(),
            description: "Lead ID: rec-1".to_string(),
            list_id: ListId::from("todo"),
        };
        assert_eq!(store.create_item(&request).unwrap().as_str(), "item-1");
        assert_eq!(store.create_item(&request).unwrap().as_str(), "item-2");
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn test_injected_failures() {
        let store = MemoryBoardStore::new(vec![BoardItem::new(
            ItemId::from("card-1"),
            ListId::from("todo"),
        )]);
        store.fail_on("card-1");
        assert!(store
            .move_item(&ItemId::from("card-1"), &ListId::from("doing"))
            .is_err());

        store.fail_listing(true);
        assert!(store.list_items().is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryBoardStore::default();
        let handle = store.clone();
        handle.upsert(BoardItem::new(ItemId::from("card-1"), ListId::from("todo")));
        assert!(store.item(&ItemId::from("card-1")).is_some());
        assert!(store.remove(&ItemId::from("card-1")).is_some());
        assert!(handle.items().is_empty());
    }
}
