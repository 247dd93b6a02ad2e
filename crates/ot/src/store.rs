//! Dataset store interface
//!
//! The candidate matcher is a thin, cryptography-free layer over an external
//! key-value store; this trait is that seam. `MemoryStore` backs the server
//! and the tests; SQL or file-index implementations live outside this crate.

use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};

/// One dataset row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

/// Key-value lookups used by the candidate matcher
pub trait DatasetStore: Send + Sync {
    /// All rows whose key starts with `prefix` (`key LIKE prefix%`)
    fn lookup_by_prefix(&self, dataset_id: &str, prefix: &str) -> Vec<Record>;

    /// Rows whose hashed key equals `key_hash`; 0 or 1 rows expected
    fn lookup_by_key(&self, dataset_id: &str, key_hash: &str) -> Vec<Record>;
}

/// Hex SHA-256 of a dataset key, the form obfuscation-mode lookups use
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

#[derive(Debug, Default)]
struct Dataset {
    /// Ordered for prefix range scans
    rows: BTreeMap<String, String>,
    /// Hex SHA-256 of key -> key
    by_hash: HashMap<String, String>,
}

/// In-memory dataset store with a hashed-key index built at insert time
#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: HashMap<String, Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one row
    pub fn insert(&mut self, dataset_id: &str, key: &str, value: &str) {
        let dataset = self.datasets.entry(dataset_id.to_string()).or_default();
        dataset.by_hash.insert(hash_key(key), key.to_string());
        dataset.rows.insert(key.to_string(), value.to_string());
    }

    /// Number of rows in one dataset
    pub fn len(&self, dataset_id: &str) -> usize {
        self.datasets.get(dataset_id).map_or(0, |d| d.rows.len())
    }

    pub fn is_empty(&self, dataset_id: &str) -> bool {
        self.len(dataset_id) == 0
    }
}

impl DatasetStore for MemoryStore {
    fn lookup_by_prefix(&self, dataset_id: &str, prefix: &str) -> Vec<Record> {
        let Some(dataset) = self.datasets.get(dataset_id) else {
            return Vec::new();
        };
        dataset
            .rows
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| Record {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    fn lookup_by_key(&self, dataset_id: &str, key_hash: &str) -> Vec<Record> {
        let Some(dataset) = self.datasets.get(dataset_id) else {
            return Vec::new();
        };
        dataset
            .by_hash
            .get(key_hash)
            .and_then(|key| {
                dataset.rows.get(key).map(|value| Record {
                    key: key.clone(),
                    value: value.clone(),
                })
            })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("ds", "12345", "Alice");
        store.insert("ds", "12399", "Bob");
        store.insert("ds", "45678", "Carol");
        store
    }

    #[test]
    fn test_prefix_lookup_collects_collisions() {
        let store = sample_store();
        let records = store.lookup_by_prefix("ds", "123");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "12345");
        assert_eq!(records[1].key, "12399");
    }

    #[test]
    fn test_prefix_lookup_misses() {
        let store = sample_store();
        assert!(store.lookup_by_prefix("ds", "999").is_empty());
        assert!(store.lookup_by_prefix("other", "123").is_empty());
    }

    #[test]
    fn test_hashed_key_lookup() {
        let store = sample_store();
        let records = store.lookup_by_key("ds", &hash_key("45678"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "Carol");

        assert!(store.lookup_by_key("ds", &hash_key("00000")).is_empty());
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut store = sample_store();
        store.insert("ds", "12345", "Alicia");
        assert_eq!(store.len("ds"), 3);
        assert_eq!(store.lookup_by_key("ds", &hash_key("12345"))[0].value, "Alicia");
    }
}
