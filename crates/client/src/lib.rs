//! blindquery Client
//!
//! Requester-side SDK: builds blinded query batches, exchanges them with a
//! responder gateway over HTTP, and recovers one result per identifier.
//!
//! # Example
//!
//! ```no_run
//! use blindquery_client::{JobParams, PirClient};
//! use blindquery_ot::QueryMode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PirClient::new("http://localhost:8091")?;
//!
//!     let params = JobParams {
//!         dataset_id: "default".to_string(),
//!         job_id: None,
//!         mode: QueryMode::Filter { filter_length: 3 },
//!         ids: vec!["12345".to_string()],
//!     };
//!
//!     for result in client.execute(&params).await? {
//!         println!("{}: exists={} value={:?}", result.id, result.exists, result.value);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod gateway;
mod job;

pub use error::{ClientError, Result};
pub use gateway::{GatewayClient, DEFAULT_RETRY_COUNT};
pub use job::{JobParams, PirClient};
