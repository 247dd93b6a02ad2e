//! Server configuration

use std::path::PathBuf;

use serde::Deserialize;

/// One service registration accepted by the auth endpoint.
///
/// Auth/service persistence lives outside this server; the registry is a
/// static table loaded from a JSON file at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    pub service_id: String,
    pub access_key: String,
    pub dataset_id: String,
    /// Wire algorithm type: 0 = filter, 1 = obfuscation
    pub algorithm: u8,
    #[serde(default)]
    pub filter_length: Option<usize>,
    #[serde(default)]
    pub obfuscation_order: Option<u32>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// JSON object of key -> payload rows loaded into the in-memory store
    pub dataset_file: Option<PathBuf>,

    /// Dataset identifier the loaded rows are registered under
    pub dataset_id: String,

    /// JSON list of `ServiceEntry` records for the auth endpoint
    pub services_file: Option<PathBuf>,

    /// Maximum query items accepted per job request
    pub max_batch_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8091,
            dataset_file: None,
            dataset_id: "default".to_string(),
            services_file: None,
            max_batch_size: 256,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BLINDQUERY_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(port) = std::env::var("BLINDQUERY_PORT") {
            if let Ok(p) = port.parse() {
                config.port = p;
            }
        }

        if let Ok(file) = std::env::var("BLINDQUERY_DATASET_FILE") {
            config.dataset_file = Some(PathBuf::from(file));
        }

        if let Ok(id) = std::env::var("BLINDQUERY_DATASET_ID") {
            config.dataset_id = id;
        }

        if let Ok(file) = std::env::var("BLINDQUERY_SERVICES_FILE") {
            config.services_file = Some(PathBuf::from(file));
        }

        if let Ok(max) = std::env::var("BLINDQUERY_MAX_BATCH_SIZE") {
            if let Ok(m) = max.parse() {
                config.max_batch_size = m;
            }
        }

        config
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
