// crates/sync-engine/src/dry_run.rs
//! Store wrappers that read for real and only log writes

use crate::error::StoreResult;
use crate::store::{BoardStore, RecordStore};
use leadsync_core::{BoardItem, ItemId, ListId, NewItem, Record, RecordId, Status};
use uuid::Uuid;

/// Record store that delegates reads and swallows mutations
#[derive(Debug, Clone)]
pub struct DryRunRecordStore<R> {
    inner: R,
}

impl<R: RecordStore> DryRunRecordStore<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RecordStore> RecordStore for DryRunRecordStore<R> {
    fn list_records(&self) -> StoreResult<Vec<Record>> {
        self.inner.list_records()
    }

    fn update_status(&self, id: &RecordId, status: &Status) -> StoreResult<()> {
        log::info!("[dry-run] would set status of record {} to '{}'", id, status);
        Ok(())
    }

    fn set_external_ref(&self, id: &RecordId, item: &ItemId) -> StoreResult<()> {
        log::info!("[dry-run] would link record {} to board item {}", id, item);
        Ok(())
    }
}

/// Board store that delegates reads and swallows mutations
///
/// Created items get a synthetic `dry-run-<uuid>` id so the link step can
/// still be reported.
#[derive(Debug, Clone)]
pub struct DryRunBoardStore<B> {
    inner: B,
}

impl<B: BoardStore> DryRunBoardStore<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: BoardStore> BoardStore for DryRunBoardStore<B> {
    fn list_items(&self) -> StoreResult<Vec<BoardItem>> {
        self.inner.list_items()
    }

    fn create_item(&self, request: &NewItem) -> StoreResult<ItemId> {
        log::info!(
            "[dry-run] would create board item '{}' in list {}",
            request.title,
            request.list_id
        );
        Ok(ItemId::from(format!("dry-run-{}", Uuid::new_v4())))
    }

    fn move_item(&self, id: &ItemId, list: &ListId) -> StoreResult<()> {
        log::info!("[dry-run] would move board item {} to list {}", id, list);
        Ok(())
    }
}
