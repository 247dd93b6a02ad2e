//! Wire message bodies
//!
//! One request/response pair per job batch. All bodies are JSON with
//! camelCase keys; group elements are decimal strings.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::bignum::serde_biguint;
use crate::error::{ProtocolError, Result};

/// Query mode selector carried on the wire.
///
/// `0` is the prefix-filter mode (several candidates possible, leaks a short
/// identifier prefix); `1` is the obfuscation mode (at most one real
/// candidate hidden among decoys, leaks only the decoy position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AlgorithmType {
    IdFilter,
    IdObfuscation,
}

impl From<AlgorithmType> for u8 {
    fn from(value: AlgorithmType) -> u8 {
        match value {
            AlgorithmType::IdFilter => 0,
            AlgorithmType::IdObfuscation => 1,
        }
    }
}

impl TryFrom<u8> for AlgorithmType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(AlgorithmType::IdFilter),
            1 => Ok(AlgorithmType::IdObfuscation),
            other => Err(ProtocolError::UnknownAlgorithmType(other)),
        }
    }
}

/// One blinded query item.
///
/// Exactly one lookup-key form is populated: `filter` in filter mode,
/// `id_hash_list` (with `id_index`) in obfuscation mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    /// Identifier prefix disclosed to the holder (filter mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Ordered decoy hash list, one slot holding the real identifier's hash
    /// (obfuscation mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_hash_list: Option<Vec<String>>,

    /// Position of the real hash inside `id_hash_list`. Not secret: the
    /// holder cannot tell a real hash from a decoy by inspection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_index: Option<u32>,

    /// Blinded commitment `g^(c - reference) mod n`
    #[serde(with = "serde_biguint")]
    pub z0: BigUint,
}

/// Requester-to-holder job request, one per batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub job_id: String,
    pub dataset_id: String,
    pub algorithm: AlgorithmType,
    /// `g^a mod n` for the batch blinding pair
    #[serde(with = "serde_biguint")]
    pub x: BigUint,
    /// `g^b mod n`; the requester keeps `b` as the trapdoor
    #[serde(with = "serde_biguint")]
    pub y: BigUint,
    pub items: Vec<RequestItem>,
}

/// One masked candidate row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// `x^s * g^r mod n`
    #[serde(with = "serde_biguint")]
    pub w: BigUint,
    /// Shared group element XOR the fresh record key
    #[serde(with = "serde_biguint")]
    pub e: BigUint,
    /// base64(nonce || ciphertext || tag) of the payload under the record key
    pub c: String,
}

/// Candidate group for one request item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    pub candidates: Vec<Candidate>,
}

/// Holder-to-requester response, order-aligned with the request items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub items: Vec<ResponseItem>,
}

/// Auth handshake request (service id + access key)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub service_id: String,
    pub access_key: String,
}

/// Service configuration returned by the auth endpoint and consumed before
/// the job call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub dataset_id: String,
    pub algorithm: AlgorithmType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscation_order: Option<u32>,
}

/// Common response envelope; `code == 0` is success
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const SUCCESS: i32 = 0;

    pub fn ok(data: T) -> Self {
        Self {
            code: Self::SUCCESS,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }

    /// Unwrap the payload, surfacing a peer-reported error as such
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            return Err(ProtocolError::ErrorResponse {
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or(ProtocolError::MissingData)
    }
}
