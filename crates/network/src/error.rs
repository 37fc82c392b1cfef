// crates/network/src/error.rs
//! Error types for network operations

use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A default header could not be encoded
    #[error("Invalid header {0}")]
    InvalidHeader(String),
}

impl NetworkError {
    /// Returns true if repeating the request may succeed
    ///
    /// Connection failures, timeouts, 429 and 5xx responses are retryable;
    /// other 4xx responses and decode errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            NetworkError::Status { code, .. } => *code == 429 || *code >= 500,
            NetworkError::Decode(_) | NetworkError::InvalidUrl(_) | NetworkError::InvalidHeader(_) => {
                false
            }
        }
    }

    /// Returns true if no connection was made, so the request was never sent
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, NetworkError::Http(e) if e.is_connect())
    }

    /// Returns true if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, NetworkError::Status { code: 404, .. })
    }

    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, NetworkError::Status { code, .. } if (400..500).contains(code))
    }

    /// Returns true if the error is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self, NetworkError::Status { code, .. } if *code >= 500)
    }
}
