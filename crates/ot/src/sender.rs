//! Holder side: candidate matching and blinded response construction

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use blindquery_protocol::{
    AlgorithmType, Candidate, QueryRequest, QueryResponse, RequestItem, ResponseItem,
};

use crate::cipher::RecordCipher;
use crate::error::{OtError, Result};
use crate::group::GroupParams;
use crate::store::{DatasetStore, Record};

/// Responds to blinded query batches over a dataset store.
///
/// For every candidate row the responder draws a fresh `(r, s)` pair,
/// re-randomizes the requester's commitment and masks a fresh record key, so
/// nothing about non-matching payloads survives the exchange.
#[derive(Debug, Clone)]
pub struct Responder {
    params: GroupParams,
}

impl Responder {
    pub fn new(params: GroupParams) -> Self {
        Self { params }
    }

    /// Process one job request: resolve candidates per item and blind each
    /// one, preserving the request's item order and grouping.
    pub fn respond<R: RngCore + CryptoRng>(
        &self,
        store: &dyn DatasetStore,
        request: &QueryRequest,
        rng: &mut R,
    ) -> Result<QueryResponse> {
        let mut items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let matches =
                match_candidates(store, &request.dataset_id, request.algorithm, item)?;
            let mut candidates = Vec::with_capacity(matches.len());
            for (reference, record) in &matches {
                candidates.push(self.blind_candidate(
                    &request.x,
                    &request.y,
                    &item.z0,
                    reference,
                    record,
                    rng,
                )?);
            }
            items.push(ResponseItem { candidates });
        }
        tracing::debug!(
            job_id = %request.job_id,
            items = items.len(),
            "query batch answered"
        );
        Ok(QueryResponse { items })
    }

    /// `w = x^s * g^r`, `z1 = z0 * g^reference`, shared key `z1^s * y^r`,
    /// fresh record key masked by XOR. `z1` collapses to `g^(a*b)` exactly
    /// when this candidate's reference equals the requester's hidden target.
    fn blind_candidate<R: RngCore + CryptoRng>(
        &self,
        x: &BigUint,
        y: &BigUint,
        z0: &BigUint,
        reference: &BigUint,
        record: &Record,
        rng: &mut R,
    ) -> Result<Candidate> {
        let r = self.params.random_scalar(rng);
        let s = self.params.random_scalar(rng);

        let w = self
            .params
            .mul_mod_n(&self.params.power(x, &s), &self.params.commit(&r));
        let z1 = self.params.mul_mod_n(z0, &self.params.commit(reference));
        let shared = self
            .params
            .mul_mod_n(&self.params.power(&z1, &s), &self.params.power(y, &r));

        let key = RecordCipher::generate_key(rng);
        let e = &shared ^ &RecordCipher::key_to_int(&key);
        let c = RecordCipher::seal(rng, &record.value, &key)?;

        Ok(Candidate { w, e, c })
    }
}

/// Resolve candidate rows for one query item together with the reference
/// value the blinding uses for each: the row's numeric identifier in filter
/// mode, the matched decoy position in obfuscation mode. No cryptography
/// happens here.
fn match_candidates(
    store: &dyn DatasetStore,
    dataset_id: &str,
    algorithm: AlgorithmType,
    item: &RequestItem,
) -> Result<Vec<(BigUint, Record)>> {
    match algorithm {
        AlgorithmType::IdFilter => {
            let filter = item
                .filter
                .as_deref()
                .ok_or_else(|| OtError::MalformedItem("missing filter".to_string()))?;
            Ok(store
                .lookup_by_prefix(dataset_id, filter)
                .into_iter()
                .map(|record| (BigUint::from_bytes_be(record.key.as_bytes()), record))
                .collect())
        }
        AlgorithmType::IdObfuscation => {
            let hashes = item
                .id_hash_list
                .as_ref()
                .ok_or_else(|| OtError::MalformedItem("missing id hash list".to_string()))?;
            let mut matches = Vec::new();
            for (position, hash) in hashes.iter().enumerate() {
                for record in store.lookup_by_key(dataset_id, hash) {
                    matches.push((BigUint::from(position as u32), record));
                }
            }
            Ok(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::{QueryBuilder, QueryMode, Recoverer};
    use crate::store::MemoryStore;
    use rand::rngs::OsRng;

    fn sample_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("ds", "12345", "Alice");
        store.insert("ds", "12399", "Bob");
        store
    }

    fn run(
        store: &MemoryStore,
        mode: QueryMode,
        ids: &[&str],
    ) -> Vec<crate::receiver::QueryResult> {
        let params = GroupParams::default();
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        let batch = QueryBuilder::new(params.clone(), mode)
            .build(&ids, &mut OsRng)
            .unwrap();
        let request = batch.to_request("job", "ds");
        let response = Responder::new(params.clone())
            .respond(store, &request, &mut OsRng)
            .unwrap();
        Recoverer::new(params).recover(&batch, &response)
    }

    #[test]
    fn test_filter_roundtrip_with_prefix_collision() {
        let store = sample_store();
        let results = run(&store, QueryMode::Filter { filter_length: 3 }, &["12345"]);
        assert!(results[0].exists);
        assert_eq!(results[0].value.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_filter_absent_identifier() {
        let store = sample_store();
        let results = run(&store, QueryMode::Filter { filter_length: 3 }, &["99999"]);
        assert!(!results[0].exists);
        assert_eq!(results[0].value, None);
    }

    #[test]
    fn test_obfuscation_roundtrip() {
        let store = sample_store();
        let results = run(&store, QueryMode::Obfuscation { order: 4 }, &["12399"]);
        assert_eq!(results[0].value.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_missing_filter_rejected() {
        let store = sample_store();
        let params = GroupParams::default();
        let batch = QueryBuilder::new(params.clone(), QueryMode::Obfuscation { order: 2 })
            .build(&["12345".to_string()], &mut OsRng)
            .unwrap();

        // Claim filter mode but carry obfuscation items
        let mut request = batch.to_request("job", "ds");
        request.algorithm = AlgorithmType::IdFilter;

        let result = Responder::new(params).respond(&store, &request, &mut OsRng);
        assert!(matches!(result, Err(OtError::MalformedItem(_))));
    }

    #[test]
    fn test_prefix_miss_yields_empty_candidate_group() {
        let store = sample_store();
        let params = GroupParams::default();
        let batch = QueryBuilder::new(params.clone(), QueryMode::Filter { filter_length: 3 })
            .build(&["99999".to_string()], &mut OsRng)
            .unwrap();
        let request = batch.to_request("job", "ds");

        let response = Responder::new(params)
            .respond(&store, &request, &mut OsRng)
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert!(response.items[0].candidates.is_empty());
    }
}
