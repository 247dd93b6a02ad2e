//! OT core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtError {
    /// Tag verification failed. During recovery this is expected control
    /// flow ("this candidate is not the match"), never propagated upward.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid key length: {0} bytes")]
    InvalidKeyLength(usize),

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Malformed query item: {0}")]
    MalformedItem(String),

    #[error("Invalid service config: {0}")]
    InvalidServiceConfig(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] blindquery_protocol::ProtocolError),
}

pub type Result<T> = std::result::Result<T, OtError>;
