// crates/sync-engine/examples/sync_demo.rs
//! Demonstration of sync engine capabilities

use leadsync_core::{BoardItem, ItemId, ListId, Record, RecordId, Status, Timestamp};
use leadsync_sync_engine::{
    MemoryBoardStore, MemoryRecordStore, StatusMap, SyncEngine, SyncOptions,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("LeadSync Engine Demo");
    println!("====================\n");

    let map = StatusMap::new(vec![
        (Status::from("New"), ListId::from("todo")),
        (Status::from("Contacted"), ListId::from("in-progress")),
        (Status::from("Qualified"), ListId::from("done")),
    ])
    .unwrap();

    let now = 1_700_000_000;
    let records = MemoryRecordStore::new(vec![
        Record::new(RecordId::from("lead-1"), "Moby Dick Ltd").with_status("New"),
        Record::new(RecordId::from("lead-2"), "Ishmael & Sons")
            .with_status("Contacted")
            .with_external_ref("card-2")
            .with_last_modified(Timestamp::from_seconds(now)),
        Record::new(RecordId::from("lead-3"), "Queequeg Co")
            .with_status("Contacted")
            .with_external_ref("card-3")
            .with_last_modified(Timestamp::from_seconds(now)),
    ]);
    let board = MemoryBoardStore::new(vec![
        BoardItem::new(ItemId::from("card-2"), ListId::from("todo"))
            .with_last_activity(Timestamp::from_seconds(now + 10)),
        BoardItem::new(ItemId::from("card-3"), ListId::from("done"))
            .with_last_activity(Timestamp::from_seconds(now + 600)),
    ]);

    let engine = SyncEngine::new(records.clone(), board.clone(), map, SyncOptions::default());

    println!("1. First run");
    let report = engine.run().unwrap();
    println!("  {}", report);
    for call in records.calls().iter().chain(board.calls().iter()) {
        println!("  ✓ {:?}", call);
    }

    records.clear_calls();
    board.clear_calls();

    println!("\n2. Second run (no external changes)");
    let report = engine.run().unwrap();
    println!("  {} mutations", report.mutations());

    println!("\nFinal board:");
    for item in board.items() {
        println!("  {} [{}] {}", item.id, item.list_id, item.name);
    }
}
