//! Client error types

use thiserror::Error;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport retries exhausted; the last failure is carried verbatim
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: usize, message: String },

    /// Rejected before any protocol step ran; not retryable
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wire protocol error (bad envelope, peer-reported failure)
    #[error("Protocol error: {0}")]
    Protocol(#[from] blindquery_protocol::ProtocolError),

    /// OT core error
    #[error("OT error: {0}")]
    Ot(#[from] blindquery_ot::OtError),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
