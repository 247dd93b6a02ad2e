//! blindquery Oblivious Transfer core
//!
//! Single-round blind lookup from discrete-log commitments over a fixed
//! modular group. The requester blinds each query identifier; the holder
//! re-randomizes every candidate row and masks a fresh record key; the
//! requester unmasks with its trapdoor and keeps the one candidate whose
//! authenticated decryption succeeds.

mod cipher;
mod error;
mod group;
mod receiver;
mod sender;
mod store;

pub use cipher::{RecordCipher, KEY_BYTES};
pub use error::{OtError, Result};
pub use group::GroupParams;
pub use receiver::{QueryBatch, QueryBuilder, QueryMode, QueryResult, Recoverer};
pub use sender::Responder;
pub use store::{hash_key, DatasetStore, MemoryStore, Record};
