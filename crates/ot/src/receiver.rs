//! Requester side: query construction and response recovery

use num_bigint::BigUint;
use rand::{CryptoRng, Rng, RngCore};
use sha2::{Digest, Sha256};

use blindquery_protocol::{
    AlgorithmType, Candidate, QueryRequest, QueryResponse, RequestItem, ServiceConfig,
};

use crate::cipher::RecordCipher;
use crate::error::{OtError, Result};
use crate::group::GroupParams;

/// Query construction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Disclose the identifier's first `filter_length` characters to narrow
    /// candidates; prefix collisions may yield several
    Filter { filter_length: usize },
    /// Hide the identifier's hash among `order` decoys at a random position
    Obfuscation { order: u32 },
}

impl QueryMode {
    pub fn algorithm(&self) -> AlgorithmType {
        match self {
            QueryMode::Filter { .. } => AlgorithmType::IdFilter,
            QueryMode::Obfuscation { .. } => AlgorithmType::IdObfuscation,
        }
    }
}

/// An auth handshake yields a `ServiceConfig`; the mode parameter for the
/// configured algorithm must be present.
impl TryFrom<&ServiceConfig> for QueryMode {
    type Error = OtError;

    fn try_from(config: &ServiceConfig) -> Result<Self> {
        match config.algorithm {
            AlgorithmType::IdFilter => config
                .filter_length
                .map(|filter_length| QueryMode::Filter { filter_length })
                .ok_or_else(|| {
                    OtError::InvalidServiceConfig("filter mode without filter length".to_string())
                }),
            AlgorithmType::IdObfuscation => config
                .obfuscation_order
                .map(|order| QueryMode::Obfuscation { order })
                .ok_or_else(|| {
                    OtError::InvalidServiceConfig(
                        "obfuscation mode without an order".to_string(),
                    )
                }),
        }
    }
}

/// One built query batch.
///
/// The blinding pair `(a, b)` is shared across the batch; `a` is consumed
/// building `x` and never kept, `b` stays here as the decryption trapdoor and
/// never leaves the requester. `c = (a * b) mod phi` is never transmitted.
#[derive(Debug, Clone)]
pub struct QueryBatch {
    pub ids: Vec<String>,
    pub mode: QueryMode,
    pub b: BigUint,
    pub x: BigUint,
    pub y: BigUint,
    pub items: Vec<RequestItem>,
}

impl QueryBatch {
    /// Assemble the wire request for this batch
    pub fn to_request(&self, job_id: &str, dataset_id: &str) -> QueryRequest {
        QueryRequest {
            job_id: job_id.to_string(),
            dataset_id: dataset_id.to_string(),
            algorithm: self.mode.algorithm(),
            x: self.x.clone(),
            y: self.y.clone(),
            items: self.items.clone(),
        }
    }
}

/// Builds one blinded commitment per query identifier
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    params: GroupParams,
    mode: QueryMode,
}

impl QueryBuilder {
    pub fn new(params: GroupParams, mode: QueryMode) -> Self {
        Self { params, mode }
    }

    /// Draw one blinding pair for the batch and build one item per
    /// identifier. `z0` differs per identifier; `(a, b)` does not.
    pub fn build<R: RngCore + CryptoRng>(
        &self,
        ids: &[String],
        rng: &mut R,
    ) -> Result<QueryBatch> {
        let a = self.params.random_scalar(rng);
        let b = self.params.random_scalar(rng);
        let x = self.params.commit(&a);
        let y = self.params.commit(&b);
        let c = self.params.mul_mod_order(&a, &b);

        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            let item = match self.mode {
                QueryMode::Filter { filter_length } => {
                    self.build_filter_item(id, &c, filter_length)
                }
                QueryMode::Obfuscation { order } => {
                    self.build_obfuscation_item(id, &c, order, rng)
                }
            };
            items.push(item);
        }

        tracing::debug!(items = items.len(), mode = ?self.mode, "query batch built");
        Ok(QueryBatch {
            ids: ids.to_vec(),
            mode: self.mode,
            b,
            x,
            y,
            items,
        })
    }

    /// Reference value is the identifier's bytes as a big-endian integer;
    /// the lookup key is its first `filter_length` characters (the whole
    /// identifier if shorter).
    fn build_filter_item(&self, id: &str, c: &BigUint, filter_length: usize) -> RequestItem {
        let reference = BigUint::from_bytes_be(id.as_bytes());
        let z0 = self.params.commit(&self.params.sub_mod_order(c, &reference));
        let filter: String = id.chars().take(filter_length).collect();
        RequestItem {
            filter: Some(filter),
            id_hash_list: None,
            id_index: None,
            z0,
        }
    }

    /// Reference value is a random decoy-list position; the lookup key is the
    /// full `order + 1` hash list with the real identifier's hash at that
    /// position.
    fn build_obfuscation_item<R: RngCore + CryptoRng>(
        &self,
        id: &str,
        c: &BigUint,
        order: u32,
        rng: &mut R,
    ) -> RequestItem {
        let id_index = rng.gen_range(0..=order);
        let z0 = self
            .params
            .commit(&self.params.sub_mod_order(c, &BigUint::from(id_index)));
        RequestItem {
            filter: None,
            id_hash_list: Some(decoy_hash_list(id, order, id_index, rng)),
            id_index: Some(id_index),
            z0,
        }
    }
}

/// `order + 1` hex SHA-256 slots: the real identifier's hash at `id_index`,
/// a random UUID's hash everywhere else. The holder can only tell a real hash
/// from a decoy by whether it matches a stored row.
fn decoy_hash_list<R: RngCore + CryptoRng>(
    id: &str,
    order: u32,
    id_index: u32,
    rng: &mut R,
) -> Vec<String> {
    (0..=order)
        .map(|position| {
            if position == id_index {
                hex::encode(Sha256::digest(id.as_bytes()))
            } else {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes);
                let decoy = uuid::Builder::from_random_bytes(bytes).into_uuid();
                hex::encode(Sha256::digest(decoy.as_bytes()))
            }
        })
        .collect()
}

/// Per-identifier lookup outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub id: String,
    pub exists: bool,
    pub value: Option<String>,
}

/// Unmasks each candidate with the batch trapdoor and keeps the first one
/// whose authenticated decryption succeeds
#[derive(Debug, Clone)]
pub struct Recoverer {
    params: GroupParams,
}

impl Recoverer {
    pub fn new(params: GroupParams) -> Self {
        Self { params }
    }

    /// Fold a wire response into per-identifier results, input order
    /// preserved. An item with no authenticating candidate is a normal
    /// "not found" outcome, not an error.
    pub fn recover(&self, batch: &QueryBatch, response: &QueryResponse) -> Vec<QueryResult> {
        batch
            .ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let value = response
                    .items
                    .get(index)
                    .and_then(|item| self.recover_item(&batch.b, &item.candidates));
                QueryResult {
                    id: id.clone(),
                    exists: value.is_some(),
                    value,
                }
            })
            .collect()
    }

    /// First candidate that authenticates, in input order. By protocol
    /// construction at most one honest candidate can; the rest fail either
    /// the key-width check or tag verification.
    fn recover_item(&self, b: &BigUint, candidates: &[Candidate]) -> Option<String> {
        for candidate in candidates {
            let w1 = self.params.power(&candidate.w, b);
            let unmasked = &w1 ^ &candidate.e;
            let Ok(key) = RecordCipher::key_from_int(&unmasked) else {
                continue;
            };
            if let Ok(value) = RecordCipher::open(&candidate.c, &key) {
                return Some(value);
            }
        }
        None
    }
}
