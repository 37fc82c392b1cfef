// crates/sync-engine/src/status_map.rs
//! Bidirectional status ↔ list mapping

use crate::error::{SyncError, SyncResult};
use leadsync_core::{ListId, Status};
use std::collections::BTreeMap;

/// Immutable bijection between record statuses and board lists
///
/// Built once from configuration and validated eagerly; a list that is not
/// part of the map is a normal runtime condition (boards carry unrelated
/// lists) and simply has no status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMap {
    to_list: BTreeMap<Status, ListId>,
    to_status: BTreeMap<ListId, Status>,
}

impl StatusMap {
    /// Builds the map from `(status, list)` pairs
    ///
    /// Fails if the pairs are empty, contain a blank value, map one status to
    /// two lists, map one list to two statuses, or repeat a pair.
    pub fn new<I>(pairs: I) -> SyncResult<Self>
    where
        I: IntoIterator<Item = (Status, ListId)>,
    {
        let mut to_list = BTreeMap::new();
        let mut to_status = BTreeMap::new();

        for (status, list) in pairs {
            if status.as_str().trim().is_empty() {
                return Err(SyncError::Config(format!(
                    "blank status mapped to list '{}'",
                    list
                )));
            }
            if list.as_str().trim().is_empty() {
                return Err(SyncError::Config(format!(
                    "status '{}' mapped to a blank list id",
                    status
                )));
            }
            if let Some(existing) = to_list.get(&status) {
                return Err(SyncError::Config(format!(
                    "status '{}' is mapped more than once (lists '{}' and '{}')",
                    status, existing, list
                )));
            }
            if let Some(existing) = to_status.get(&list) {
                return Err(SyncError::Config(format!(
                    "list '{}' is mapped more than once (statuses '{}' and '{}')",
                    list, existing, status
                )));
            }

            to_list.insert(status.clone(), list.clone());
            to_status.insert(list, status);
        }

        if to_list.is_empty() {
            return Err(SyncError::Config("status map is empty".to_string()));
        }

        Ok(Self { to_list, to_status })
    }

    /// Returns the list configured for `status`
    pub fn status_to_list(&self, status: &Status) -> SyncResult<&ListId> {
        self.to_list
            .get(status)
            .ok_or_else(|| SyncError::UnmappedStatus(status.clone()))
    }

    /// Returns the status configured for `list`, if any
    pub fn list_to_status(&self, list: &ListId) -> Option<&Status> {
        self.to_status.get(list)
    }

    /// Number of mapped pairs
    pub fn len(&self) -> usize {
        self.to_list.len()
    }

    /// Always false for a constructed map
    pub fn is_empty(&self) -> bool {
        self.to_list.is_empty()
    }

    /// Iterates pairs ordered by status
    pub fn iter(&self) -> impl Iterator<Item = (&Status, &ListId)> {
        self.to_list.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(status: &str, list: &str) -> (Status, ListId) {
        (Status::from(status), ListId::from(list))
    }

    fn lead_map() -> StatusMap {
        StatusMap::new(vec![
            pair("New", "todo"),
            pair("Contacted", "doing"),
            pair("Qualified", "done"),
            pair("Lost", "lost"),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_both_directions() {
        let map = lead_map();
        assert_eq!(map.len(), 4);
        assert_eq!(
            map.status_to_list(&Status::from("Contacted")).unwrap(),
            &ListId::from("doing")
        );
        assert_eq!(
            map.list_to_status(&ListId::from("done")),
            Some(&Status::from("Qualified"))
        );
    }

    #[test]
    fn test_unmapped_list_is_none() {
        let map = lead_map();
        assert_eq!(map.list_to_status(&ListId::from("icebox")), None);
    }

    #[test]
    fn test_unmapped_status_is_error() {
        let map = lead_map();
        let err = map.status_to_list(&Status::from("Archived")).unwrap_err();
        assert!(matches!(err, SyncError::UnmappedStatus(s) if s.as_str() == "Archived"));
    }

    #[test]
    fn test_status_mapped_twice_rejected() {
        let result = StatusMap::new(vec![pair("New", "todo"), pair("New", "doing")]);
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_list_mapped_twice_rejected() {
        let result = StatusMap::new(vec![pair("New", "todo"), pair("Contacted", "todo")]);
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_repeated_pair_rejected() {
        let result = StatusMap::new(vec![pair("New", "todo"), pair("New", "todo")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_rejected() {
        let result = StatusMap::new(Vec::new());
        assert!(matches!(result, Err(SyncError::Config(msg)) if msg.contains("empty")));
    }

    #[test]
    fn test_blank_values_rejected() {
        assert!(StatusMap::new(vec![pair(" ", "todo")]).is_err());
        assert!(StatusMap::new(vec![pair("New", "")]).is_err());
    }

    #[test]
    fn test_iter_is_ordered_by_status() {
        let map = lead_map();
        let statuses: Vec<&str> = map.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(statuses, vec!["Contacted", "Lost", "New", "Qualified"]);
    }
}
