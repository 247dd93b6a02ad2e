//! HTTP gateway client with a fixed-count retry wrapper

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};

/// Attempts per call; no backoff between them
pub const DEFAULT_RETRY_COUNT: usize = 3;

/// Thin reqwest wrapper talking to the responder gateway
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
    retry_count: usize,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ClientError::InvalidParameter(
                "missing gateway URL".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            retry_count: DEFAULT_RETRY_COUNT,
        })
    }

    pub fn with_retry_count(mut self, retry_count: usize) -> Self {
        self.retry_count = retry_count.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body, retrying failures a fixed number of times. After
    /// exhaustion the last failure surfaces as one terminal error.
    pub async fn post_json<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error = None;

        for attempt in 1..=self.retry_count {
            match self.post_once(&url, body).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    tracing::warn!(attempt, url = %url, error = %err, "gateway call failed");
                    last_error = Some(err);
                }
            }
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts made".to_string());
        Err(ClientError::RetriesExhausted {
            attempts: self.retry_count,
            message,
        })
    }

    async fn post_once<T, R>(&self, url: &str, body: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
