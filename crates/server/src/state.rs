//! Application state

use std::sync::Arc;

use blindquery_ot::{GroupParams, MemoryStore, Responder};

use crate::config::{ServerConfig, ServiceEntry};
use crate::error::{Result, ServerError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Dataset store backing the candidate matcher
    pub store: Arc<MemoryStore>,

    /// Blind responder over the fixed group parameters
    pub responder: Arc<Responder>,

    /// Service registry for the auth endpoint
    pub services: Arc<Vec<ServiceEntry>>,
}

impl AppState {
    /// Create application state, loading the dataset and service registry
    /// named by the configuration
    pub fn new(config: ServerConfig) -> Result<Self> {
        let mut store = MemoryStore::new();
        if let Some(path) = &config.dataset_file {
            let rows = crate::dataset::load_dataset(&mut store, &config.dataset_id, path)?;
            tracing::info!(rows, dataset = %config.dataset_id, "dataset loaded");
        } else {
            tracing::warn!("no dataset file configured; store starts empty");
        }

        let services = match &config.services_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| ServerError::Internal(format!("{}: {}", path.display(), e)))?;
                let entries: Vec<ServiceEntry> = serde_json::from_str(&raw)
                    .map_err(|e| ServerError::Internal(e.to_string()))?;
                tracing::info!(services = entries.len(), "service registry loaded");
                entries
            }
            None => Vec::new(),
        };

        Ok(Self {
            responder: Arc::new(Responder::new(GroupParams::default())),
            store: Arc::new(store),
            services: Arc::new(services),
            config: Arc::new(config),
        })
    }

    /// Row count for the configured dataset
    pub fn dataset_len(&self) -> usize {
        self.store.len(&self.config.dataset_id)
    }
}
