//! Protocol error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown algorithm type: {0}")]
    UnknownAlgorithmType(u8),

    #[error("Invalid big integer: {0}")]
    InvalidBigInteger(String),

    #[error("Peer returned error {code}: {message}")]
    ErrorResponse { code: i32, message: String },

    #[error("Response envelope carried no data")]
    MissingData,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
