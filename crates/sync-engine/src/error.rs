// crates/sync-engine/src/error.rs
//! Error types for sync operations

use leadsync_core::Status;
use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Result type for store collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during synchronization
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid engine configuration, detected before any run
    #[error("Configuration error: {0}")]
    Config(String),

    /// A status has no configured board list
    #[error("No board list configured for status '{0}'")]
    UnmappedStatus(Status),

    /// A store could not be listed, so the run cannot start
    #[error("Failed to snapshot {store} store: {source}")]
    Snapshot {
        store: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Errors reported by a record or board store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The call did not complete (network, auth, rate limit, server error)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The addressed entity does not exist in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store answered but the payload could not be understood
    #[error("Malformed response: {0}")]
    Parse(String),
}

impl StoreError {
    /// Returns true if the addressed entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
