// crates/sync-engine/src/report.rs
//! Outcome counters for a sync run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What one pass did with the entities it examined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// Entities looked at
    pub examined: usize,
    /// Board items created for unlinked records
    pub created: usize,
    /// Links written back to records
    pub linked: usize,
    /// Board items moved to another list
    pub moved: usize,
    /// Record statuses overwritten from the board
    pub status_updated: usize,
    /// Records without a status
    pub skipped_unclassified: usize,
    /// Lists or statuses with no mapping
    pub skipped_unmapped: usize,
    /// Pairs already agreeing
    pub skipped_in_sync: usize,
    /// Pairs where the other side won the conflict
    pub skipped_kept: usize,
    /// Records linked to an item that is no longer on the board
    pub skipped_missing: usize,
    /// Board items no record links to
    pub skipped_unlinked: usize,
    /// Items linked from more than one record
    pub skipped_ambiguous: usize,
    /// Store calls that failed
    pub failures: usize,
}

impl PassReport {
    /// Successful mutation calls issued by the pass
    pub fn mutations(&self) -> usize {
        self.created + self.linked + self.moved + self.status_updated
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} examined, {} created, {} linked, {} moved, {} updated, {} in sync, {} kept, {} skipped, {} failed",
            self.examined,
            self.created,
            self.linked,
            self.moved,
            self.status_updated,
            self.skipped_in_sync,
            self.skipped_kept,
            self.skipped_unclassified
                + self.skipped_unmapped
                + self.skipped_missing
                + self.skipped_unlinked
                + self.skipped_ambiguous,
            self.failures
        )
    }
}

/// Result of one full run (both passes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records_seen: usize,
    pub items_seen: usize,
    /// Pass A: board → record
    pub board_to_records: PassReport,
    /// Pass B: record → board
    pub records_to_board: PassReport,
}

impl SyncReport {
    /// Successful mutation calls across both passes
    pub fn mutations(&self) -> usize {
        self.board_to_records.mutations() + self.records_to_board.mutations()
    }

    /// Returns true if any store call failed
    pub fn has_failures(&self) -> bool {
        self.board_to_records.failures + self.records_to_board.failures > 0
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "board->records: {}; records->board: {}",
            self.board_to_records, self.records_to_board
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(a: PassReport, b: PassReport) -> SyncReport {
        let now = Utc::now();
        SyncReport {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            records_seen: 0,
            items_seen: 0,
            board_to_records: a,
            records_to_board: b,
        }
    }

    #[test]
    fn test_mutations_sum() {
        let pass_a = PassReport {
            status_updated: 2,
            ..Default::default()
        };
        let pass_b = PassReport {
            created: 1,
            linked: 1,
            moved: 3,
            ..Default::default()
        };
        assert_eq!(pass_a.mutations(), 2);
        assert_eq!(report(pass_a, pass_b).mutations(), 7);
    }

    #[test]
    fn test_has_failures() {
        assert!(!report(PassReport::default(), PassReport::default()).has_failures());

        let failing = PassReport {
            failures: 1,
            ..Default::default()
        };
        assert!(report(PassReport::default(), failing).has_failures());
    }

    #[test]
    fn test_display_summary() {
        let pass = PassReport {
            examined: 4,
            moved: 1,
            skipped_unmapped: 1,
            skipped_missing: 1,
            ..Default::default()
        };
        let text = pass.to_string();
        assert!(text.contains("4 examined"));
        assert!(text.contains("1 moved"));
        assert!(text.contains("2 skipped"));
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(report(PassReport::default(), PassReport::default())).unwrap();
        assert!(json.get("run_id").is_some());
        assert_eq!(json["records_to_board"]["created"], 0);
    }
}
