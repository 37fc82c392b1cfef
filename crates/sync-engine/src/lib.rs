// crates/sync-engine/src/lib.rs
//! Bidirectional lead synchronization engine
//!
//! Reconciles a record store (leads with a status property) with a board
//! (cards placed in lists):
//! - Status ↔ list mapping
//! - Last-writer-wins conflict resolution with a grace window
//! - Automatic board item creation and linking
//! - Dry-run and in-memory stores
//!
//! # Example
//!
//! ```rust
//! use leadsync_core::{ListId, Record, RecordId, Status};
//! use leadsync_sync_engine::{
//!     MemoryBoardStore, MemoryRecordStore, StatusMap, SyncEngine, SyncOptions,
//! };
//!
//! let map = StatusMap::new(vec![(Status::from("New"), ListId::from("todo"))]).unwrap();
//! let records = MemoryRecordStore::new(vec![
//!     Record::new(RecordId::from("rec-1"), "Ada Lovelace").with_status("New"),
//! ]);
//! let board = MemoryBoardStore::default();
//!
//! let engine = SyncEngine::new(records, board, map, SyncOptions::default());
//! let report = engine.run().unwrap();
//!
//! assert_eq!(report.records_to_board.created, 1);
//! assert_eq!(report.records_to_board.linked, 1);
//! ```

mod conflict;
mod dry_run;
mod engine;
mod error;
mod memory;
mod report;
mod status_map;
mod store;

pub use conflict::{decide, ConflictResolver, Side};
pub use dry_run::{DryRunBoardStore, DryRunRecordStore};
pub use engine::{SyncEngine, SyncOptions};
pub use error::{StoreError, StoreResult, SyncError, SyncResult};
pub use memory::{MemoryBoardStore, MemoryRecordStore, StoreCall};
pub use report::{PassReport, SyncReport};
pub use status_map::StatusMap;
pub use store::{BoardStore, RecordStore};
