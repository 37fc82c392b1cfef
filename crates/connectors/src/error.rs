// crates/connectors/src/error.rs

use leadsync_network::NetworkError;
use leadsync_sync_engine::StoreError;
use thiserror::Error;

/// Result type for connector construction
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Errors raised while setting up a connector
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// A required setting is missing or malformed
    #[error("Invalid {connector} setting '{field}': {message}")]
    InvalidSetting {
        connector: &'static str,
        field: &'static str,
        message: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] NetworkError),
}

impl ConnectorError {
    pub(crate) fn missing(connector: &'static str, field: &'static str) -> Self {
        ConnectorError::InvalidSetting {
            connector,
            field,
            message: "must not be empty".to_string(),
        }
    }
}

/// Converts a failed HTTP call into the engine's store error
pub(crate) fn store_error(context: &str, err: NetworkError) -> StoreError {
    if err.is_not_found() {
        return StoreError::NotFound(context.to_string());
    }
    match err {
        NetworkError::Decode(msg) => StoreError::Parse(format!("{}: {}", context, msg)),
        other => StoreError::Transport(format!("{}: {}", context, other)),
    }
}
