// crates/sync-engine/src/engine.rs
//! Two-pass reconciliation between the record store and the board

use crate::conflict::{ConflictResolver, Side};
use crate::error::{SyncError, SyncResult};
use crate::report::{PassReport, SyncReport};
use crate::status_map::StatusMap;
use crate::store::{BoardStore, RecordStore};
use chrono::Utc;
use leadsync_core::{BoardItem, ItemId, NewItem, Record, Status};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

/// Tunables for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// How much newer a board edit must be before it beats the record
    pub grace: Duration,
}

impl SyncOptions {
    pub fn with_grace_seconds(seconds: u64) -> Self {
        Self {
            grace: Duration::from_secs(seconds),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::with_grace_seconds(30)
    }
}

/// Main synchronization engine
///
/// Each run takes one snapshot of both stores and runs the board → record
/// pass followed by the record → board pass over that snapshot. Mutations
/// from the first pass are not visible to the second; repeated runs converge.
/// Entity-level store failures are logged and counted, never fatal.
pub struct SyncEngine<R, B> {
    records: R,
    board: B,
    status_map: StatusMap,
    resolver: ConflictResolver,
}

impl<R, B> SyncEngine<R, B>
where
    R: RecordStore,
    B: BoardStore,
{
    /// Creates a new sync engine
    pub fn new(records: R, board: B, status_map: StatusMap, options: SyncOptions) -> Self {
        Self {
            records,
            board,
            status_map,
            resolver: ConflictResolver::new(options.grace),
        }
    }

    pub fn status_map(&self) -> &StatusMap {
        &self.status_map
    }

    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    pub fn record_store(&self) -> &R {
        &self.records
    }

    pub fn board_store(&self) -> &B {
        &self.board
    }

    /// Performs one full run over fresh snapshots of both stores
    ///
    /// Fails only if a snapshot cannot be taken, in which case no mutation
    /// has been issued.
    pub fn run(&self) -> SyncResult<SyncReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        log::info!("[{}] Starting sync run", run_id);

        let records = self
            .records
            .list_records()
            .map_err(|source| SyncError::Snapshot {
                store: "record",
                source,
            })?;
        let items = self
            .board
            .list_items()
            .map_err(|source| SyncError::Snapshot {
                store: "board",
                source,
            })?;
        log::info!(
            "[{}] Snapshot: {} records, {} board items",
            run_id,
            records.len(),
            items.len()
        );

        let board_to_records = self.sync_board_to_records(&records, &items);
        log::info!("[{}] board->records: {}", run_id, board_to_records);

        let records_to_board = self.sync_records_to_board(&records, &items);
        log::info!("[{}] records->board: {}", run_id, records_to_board);

        Ok(SyncReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            records_seen: records.len(),
            items_seen: items.len(),
            board_to_records,
            records_to_board,
        })
    }

    /// Pass A: applies board placement to linked records where the board wins
    pub fn sync_board_to_records(&self, records: &[Record], items: &[BoardItem]) -> PassReport {
        let mut report = PassReport::default();
        let (by_ref, ambiguous) = index_by_external_ref(records);

        for item in items {
            report.examined += 1;

            let Some(record) = by_ref.get(&item.id) else {
                report.skipped_unlinked += 1;
                continue;
            };
            if ambiguous.contains(&item.id) {
                log::warn!(
                    "Board item {} is linked from several records; skipping",
                    item.id
                );
                report.skipped_ambiguous += 1;
                continue;
            }

            let Some(desired) = self.status_map.list_to_status(&item.list_id) else {
                log::debug!(
                    "Board item {} is in unmapped list {}; skipping",
                    item.id,
                    item.list_id
                );
                report.skipped_unmapped += 1;
                continue;
            };

            if record.status.as_ref() == Some(desired) {
                report.skipped_in_sync += 1;
                continue;
            }

            match self.resolver.decide(record.last_modified, item.last_activity) {
                Side::RecordWins => {
                    log::debug!(
                        "Record {} is authoritative over item {}; leaving status as is",
                        record.id,
                        item.id
                    );
                    report.skipped_kept += 1;
                }
                Side::BoardWins => match self.records.update_status(&record.id, desired) {
                    Ok(()) => {
                        log::info!(
                            "Updated record '{}' ({}) to status '{}'",
                            record.display_name(),
                            record.id,
                            desired
                        );
                        report.status_updated += 1;
                    }
                    Err(e) => {
                        log::warn!("Failed to update status of record {}: {}", record.id, e);
                        report.failures += 1;
                    }
                },
            }
        }

        report
    }

    /// Pass B: creates missing board items and moves items where the record wins
    pub fn sync_records_to_board(&self, records: &[Record], items: &[BoardItem]) -> PassReport {
        let mut report = PassReport::default();
        let items_by_id: HashMap<&ItemId, &BoardItem> =
            items.iter().map(|item| (&item.id, item)).collect();
        let (_, ambiguous) = index_by_external_ref(records);

        for record in records {
            report.examined += 1;

            let Some(status) = record.status.as_ref() else {
                report.skipped_unclassified += 1;
                continue;
            };

            let Some(item_id) = record.external_ref.as_ref() else {
                self.create_counterpart(record, status, &mut report);
                continue;
            };

            if ambiguous.contains(item_id) {
                report.skipped_ambiguous += 1;
                continue;
            }

            let Some(item) = items_by_id.get(item_id) else {
                log::warn!(
                    "Board item {} linked from record '{}' ({}) was not found; leaving link untouched",
                    item_id,
                    record.display_name(),
                    record.id
                );
                report.skipped_missing += 1;
                continue;
            };

            if self.status_map.list_to_status(&item.list_id) == Some(status) {
                report.skipped_in_sync += 1;
                continue;
            }

            if self.resolver.decide(record.last_modified, item.last_activity) == Side::BoardWins {
                report.skipped_kept += 1;
                continue;
            }

            let target = match self.status_map.status_to_list(status) {
                Ok(list) => list,
                Err(e) => {
                    log::debug!("Record {}: {}; skipping", record.id, e);
                    report.skipped_unmapped += 1;
                    continue;
                }
            };

            match self.board.move_item(&item.id, target) {
                Ok(()) => {
                    log::info!(
                        "Moved item for '{}' ({}) to list {} ('{}')",
                        record.display_name(),
                        item.id,
                        target,
                        status
                    );
                    report.moved += 1;
                }
                Err(e) => {
                    log::warn!("Failed to move board item {}: {}", item.id, e);
                    report.failures += 1;
                }
            }
        }

        report
    }

    /// Creates the board item for an unlinked record and stores the link once
    fn create_counterpart(&self, record: &Record, status: &Status, report: &mut PassReport) {
        let list = match self.status_map.status_to_list(status) {
            Ok(list) => list.clone(),
            Err(e) => {
                log::debug!("Record {}: {}; not creating a board item", record.id, e);
                report.skipped_unmapped += 1;
                return;
            }
        };

        let request = NewItem::for_record(record, list);
        let new_id = match self.board.create_item(&request) {
            Ok(id) => id,
            Err(e) => {
                log::warn!(
                    "Failed to create board item for record '{}' ({}): {}",
                    record.display_name(),
                    record.id,
                    e
                );
                report.failures += 1;
                return;
            }
        };
        report.created += 1;

        match self.records.set_external_ref(&record.id, &new_id) {
            Ok(()) => {
                log::info!(
                    "Created board item {} for record '{}' ({})",
                    new_id,
                    record.display_name(),
                    record.id
                );
                report.linked += 1;
            }
            Err(e) => {
                log::error!(
                    "Created board item {} but failed to link it from record {}: {}; link or remove the item manually",
                    new_id,
                    record.id,
                    e
                );
                report.failures += 1;
            }
        }
    }
}

/// Maps each linked item id to its record, plus the ids linked more than once
fn index_by_external_ref(records: &[Record]) -> (HashMap<&ItemId, &Record>, HashSet<&ItemId>) {
    let mut by_ref = HashMap::new();
    let mut ambiguous = HashSet::new();

    for record in records {
        if let Some(item_id) = record.external_ref.as_ref() {
            if by_ref.insert(item_id, record).is_some() {
                ambiguous.insert(item_id);
            }
        }
    }

    (by_ref, ambiguous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBoardStore, MemoryRecordStore, StoreCall};
    use leadsync_core::{ListId, RecordId, Timestamp};

    fn status_map() -> StatusMap {
        StatusMap::new(vec![
            (Status::from("New"), ListId::from("todo")),
            (Status::from("Contacted"), ListId::from("doing")),
        ])
        .unwrap()
    }

    fn engine(
        records: Vec<Record>,
        items: Vec<BoardItem>,
    ) -> SyncEngine<MemoryRecordStore, MemoryBoardStore> {
        SyncEngine::new(
            MemoryRecordStore::new(records),
            MemoryBoardStore::new(items),
            status_map(),
            SyncOptions::default(),
        )
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine(vec![], vec![]);
        assert_eq!(engine.status_map().len(), 2);
        assert_eq!(engine.resolver().grace(), Duration::from_secs(30));
    }

    #[test]
    fn test_empty_stores_produce_empty_report() {
        let report = engine(vec![], vec![]).run().unwrap();
        assert_eq!(report.mutations(), 0);
        assert_eq!(report.records_seen, 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_unlinked_items_are_ignored_by_pass_a() {
        let items = vec![BoardItem::new(ItemId::from("card-1"), ListId::from("todo"))];
        let engine = engine(vec![], items);

        let report = engine.run().unwrap();
        assert_eq!(report.board_to_records.skipped_unlinked, 1);
        assert!(engine.record_store().calls().is_empty());
    }

    #[test]
    fn test_board_can_classify_unclassified_record() {
        let records = vec![Record::new(RecordId::from("rec-1"), "Ada").with_external_ref("card-1")];
        let items = vec![BoardItem::new(ItemId::from("card-1"), ListId::from("doing"))
            .with_last_activity(Timestamp::from_seconds(100))];
        let engine = engine(records, items);

        let report = engine.run().unwrap();

        assert_eq!(report.board_to_records.status_updated, 1);
        assert_eq!(report.records_to_board.skipped_unclassified, 1);
        assert_eq!(
            engine.record_store().calls(),
            vec![StoreCall::UpdateStatus {
                record: RecordId::from("rec-1"),
                status: Status::from("Contacted"),
            }]
        );
        assert!(engine.board_store().calls().is_empty());
    }

    #[test]
    fn test_record_with_unmapped_status_is_not_created() {
        let records = vec![Record::new(RecordId::from("rec-1"), "Ada").with_status("Archived")];
        let engine = engine(records, vec![]);

        let report = engine.run().unwrap();

        assert_eq!(report.records_to_board.skipped_unmapped, 1);
        assert!(engine.board_store().calls().is_empty());
    }

    #[test]
    fn test_ambiguous_links_are_skipped_by_both_passes() {
        let records = vec![
            Record::new(RecordId::from("rec-1"), "Ada")
                .with_status("New")
                .with_external_ref("card-1"),
            Record::new(RecordId::from("rec-2"), "Alan")
                .with_status("Contacted")
                .with_external_ref("card-1"),
        ];
        let items = vec![BoardItem::new(ItemId::from("card-1"), ListId::from("doing"))];
        let engine = engine(records, items);

        let report = engine.run().unwrap();

        assert_eq!(report.board_to_records.skipped_ambiguous, 1);
        assert_eq!(report.records_to_board.skipped_ambiguous, 2);
        assert_eq!(report.mutations(), 0);
    }

    #[test]
    fn test_card_in_unmapped_list_is_moved_when_record_wins() {
        let records = vec![Record::new(RecordId::from("rec-1"), "Ada")
            .with_status("New")
            .with_external_ref("card-1")
            .with_last_modified(Timestamp::from_seconds(500))];
        let items = vec![BoardItem::new(ItemId::from("card-1"), ListId::from("icebox"))
            .with_last_activity(Timestamp::from_seconds(100))];
        let engine = engine(records, items);

        let report = engine.run().unwrap();

        assert_eq!(report.board_to_records.skipped_unmapped, 1);
        assert_eq!(report.records_to_board.moved, 1);
        assert_eq!(
            engine.board_store().calls(),
            vec![StoreCall::MoveItem {
                item: ItemId::from("card-1"),
                list: ListId::from("todo"),
            }]
        );
    }
}
