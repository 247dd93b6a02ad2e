//! blindquery Server
//!
//! HTTP responder for the blind-lookup protocol:
//! - auth handshake (service id + access key -> service configuration)
//! - one query endpoint running the blind responder over the dataset store
//!
//! The server never learns which identifier a requester is after; it only
//! ever sees blinded commitments and the disclosed lookup keys (a short
//! prefix, or a decoy hash list).

pub mod config;
pub mod dataset;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ServerConfig, ServiceEntry};
pub use error::{Result, ServerError};
pub use state::AppState;
