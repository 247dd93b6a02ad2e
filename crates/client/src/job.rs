//! Job orchestration: build -> exchange -> recover

use rand::rngs::OsRng;
use uuid::Uuid;

use blindquery_ot::{GroupParams, QueryBuilder, QueryMode, QueryResult, Recoverer};
use blindquery_protocol::{ApiResponse, AuthRequest, QueryResponse, ServiceConfig};

use crate::error::{ClientError, Result};
use crate::gateway::GatewayClient;

/// Parameters for one blind-lookup job
#[derive(Debug, Clone)]
pub struct JobParams {
    pub dataset_id: String,
    /// Generated when absent
    pub job_id: Option<String>,
    pub mode: QueryMode,
    pub ids: Vec<String>,
}

impl JobParams {
    /// Job parameters from an auth handshake result, so the returned
    /// `ServiceConfig` feeds `execute` without re-deriving the mode
    pub fn from_service_config(config: &ServiceConfig, ids: Vec<String>) -> Result<Self> {
        Ok(Self {
            dataset_id: config.dataset_id.clone(),
            job_id: None,
            mode: QueryMode::try_from(config)?,
            ids,
        })
    }

    /// Validate before any protocol step runs; failures are non-retryable
    pub fn check(&self) -> Result<()> {
        if self.dataset_id.is_empty() {
            return Err(ClientError::InvalidParameter(
                "missing dataset id".to_string(),
            ));
        }
        if self.ids.is_empty() {
            return Err(ClientError::InvalidParameter(
                "empty identifier list".to_string(),
            ));
        }
        match self.mode {
            QueryMode::Filter { filter_length } if filter_length == 0 => Err(
                ClientError::InvalidParameter("filter length must be positive".to_string()),
            ),
            QueryMode::Obfuscation { order } if order == 0 => Err(ClientError::InvalidParameter(
                "obfuscation order must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Drives exactly one build -> exchange -> recover cycle per job.
///
/// Retries belong to the gateway; this layer runs a single pass and folds
/// recovery outcomes into one result per identifier, input order preserved.
pub struct PirClient {
    gateway: GatewayClient,
    params: GroupParams,
}

impl PirClient {
    pub fn new(gateway_url: &str) -> Result<Self> {
        Ok(Self {
            gateway: GatewayClient::new(gateway_url)?,
            params: GroupParams::default(),
        })
    }

    /// Substitute group parameters (testing, parameter rotation)
    pub fn with_group_params(mut self, params: GroupParams) -> Self {
        self.params = params;
        self
    }

    /// Substitute the gateway retry count
    pub fn with_retry_count(mut self, retry_count: usize) -> Self {
        self.gateway = self.gateway.with_retry_count(retry_count);
        self
    }

    /// Authenticate a service id and fetch the query configuration consumed
    /// before the job call
    pub async fn auth(&self, service_id: &str, access_key: &str) -> Result<ServiceConfig> {
        let request = AuthRequest {
            service_id: service_id.to_string(),
            access_key: access_key.to_string(),
        };
        let envelope: ApiResponse<ServiceConfig> =
            self.gateway.post_json("/v1/pir/auth", &request).await?;
        Ok(envelope.into_data()?)
    }

    /// Execute one job: build all query items, exchange with the gateway,
    /// recover one result per identifier
    pub async fn execute(&self, params: &JobParams) -> Result<Vec<QueryResult>> {
        params.check()?;

        let builder = QueryBuilder::new(self.params.clone(), params.mode);
        let batch = builder.build(&params.ids, &mut OsRng)?;

        let job_id = params
            .job_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let request = batch.to_request(&job_id, &params.dataset_id);
        tracing::info!(job_id = %job_id, items = request.items.len(), "executing blind lookup job");

        let envelope: ApiResponse<QueryResponse> =
            self.gateway.post_json("/v1/pir/query", &request).await?;
        let response = envelope.into_data()?;

        let recoverer = Recoverer::new(self.params.clone());
        Ok(recoverer.recover(&batch, &response))
    }
}
