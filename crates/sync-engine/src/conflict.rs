// crates/sync-engine/src/conflict.rs
//! Conflict resolution between the record and board sides

use leadsync_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which side is authoritative for an entity pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Record value is propagated to the board
    RecordWins,
    /// Board value is propagated to the record
    BoardWins,
}

/// Decides the authoritative side from the two modification times
///
/// Rules, in order:
/// 1. Both present: the record wins if it is newer, or if the board is newer
///    by at most `grace` (inclusive). Otherwise the board wins.
/// 2. Only the record time: the record wins.
/// 3. Only the board time: the board wins.
/// 4. Neither: the board wins.
pub fn decide(record_time: Option<Timestamp>, board_time: Option<Timestamp>, grace: Duration) -> Side {
    match (record_time, board_time) {
        (Some(record), Some(board)) => {
            if record > board {
                return Side::RecordWins;
            }
            let grace_ms = i64::try_from(grace.as_millis()).unwrap_or(i64::MAX);
            if board.millis_since(record) <= grace_ms {
                Side::RecordWins
            } else {
                Side::BoardWins
            }
        }
        (Some(_), None) => Side::RecordWins,
        (None, Some(_)) => Side::BoardWins,
        (None, None) => Side::BoardWins,
    }
}

/// Last-writer-wins resolver with a grace window biased toward records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictResolver {
    grace: Duration,
}

impl ConflictResolver {
    /// Creates a resolver with the given grace window
    pub fn new(grace: Duration) -> Self {
        Self { grace }
    }

    /// Returns the grace window
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Decides the authoritative side for one entity pair
    pub fn decide(&self, record_time: Option<Timestamp>, board_time: Option<Timestamp>) -> Side {
        decide(record_time, board_time, self.grace)
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
