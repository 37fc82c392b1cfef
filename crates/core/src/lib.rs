//! Shared entity types for LeadSync
//!
//! Both stores are reduced to these typed entities at the parsing boundary,
//! so the reconciliation engine never handles raw API payloads.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, CoreResult};
pub use types::{BoardItem, ItemId, ListId, NewItem, Record, RecordId, Status, Timestamp};
