//! blindquery Protocol Crate
//!
//! JSON wire format for the blind-lookup protocol: the job request carrying
//! blinded query items, the per-candidate masked response, the algorithm-type
//! selector, and the auth handshake bodies.

mod bignum;
mod error;
mod messages;

pub use bignum::serde_biguint;
pub use error::{ProtocolError, Result};
pub use messages::{
    AlgorithmType, ApiResponse, AuthRequest, Candidate, QueryRequest, QueryResponse, RequestItem,
    ResponseItem, ServiceConfig,
};
