//! Dataset loading into the in-memory store

use std::collections::BTreeMap;
use std::path::Path;

use blindquery_ot::MemoryStore;

use crate::error::{Result, ServerError};

/// Load a JSON object of `key -> payload` rows into the store.
///
/// Full ingestion pipelines (CSV to table, etc.) live outside this server;
/// this loader only seeds the in-memory store.
pub fn load_dataset(store: &mut MemoryStore, dataset_id: &str, path: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ServerError::DatasetLoad(format!("{}: {}", path.display(), e)))?;
    let rows: BTreeMap<String, String> =
        serde_json::from_str(&raw).map_err(|e| ServerError::DatasetLoad(e.to_string()))?;

    let count = rows.len();
    for (key, value) in rows {
        store.insert(dataset_id, &key, &value);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blindquery_ot::DatasetStore;

    #[test]
    fn test_load_dataset_json() {
        let dir = std::env::temp_dir();
        let path = dir.join("blindquery-dataset-test.json");
        std::fs::write(&path, r#"{"12345": "Alice", "12399": "Bob"}"#).unwrap();

        let mut store = MemoryStore::new();
        let count = load_dataset(&mut store, "ds", &path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.lookup_by_prefix("ds", "123").len(), 2);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let mut store = MemoryStore::new();
        let result = load_dataset(&mut store, "ds", Path::new("/nonexistent/rows.json"));
        assert!(matches!(result, Err(ServerError::DatasetLoad(_))));
    }
}
