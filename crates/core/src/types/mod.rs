//! Domain types for LeadSync
//!
//! - `ids`: string-backed identifiers and the status value
//! - `common`: timestamps
//! - `record`: entities on the record-store side
//! - `board`: entities on the board side

mod board;
mod common;
mod ids;
mod record;

pub use board::{BoardItem, NewItem};
pub use common::Timestamp;
pub use ids::{ItemId, ListId, RecordId, Status};
pub use record::Record;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let record = Record::new(RecordId::from("rec-1"), "Ada");
        let item = BoardItem::new(ItemId::from("card-1"), ListId::from("list-1"));
        assert!(record.status.is_none());
        assert!(item.last_activity.is_none());
    }

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_millis(1_000);
        let t2 = Timestamp::from_millis(2_000);
        assert!(t2 > t1);
    }
}
