//! Service auth handshake

use axum::{extract::State, Json};

use blindquery_protocol::{AlgorithmType, ApiResponse, AuthRequest, ServiceConfig};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// POST /v1/pir/auth - validate service credentials and return the query
/// configuration the requester consumes before its job call
pub async fn auth(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<ApiResponse<ServiceConfig>>> {
    let entry = state
        .services
        .iter()
        .find(|service| service.service_id == request.service_id)
        .ok_or_else(|| ServerError::UnknownService(request.service_id.clone()))?;

    if entry.access_key != request.access_key {
        tracing::warn!(service_id = %request.service_id, "auth rejected");
        return Err(ServerError::AccessDenied(request.service_id));
    }

    let algorithm = AlgorithmType::try_from(entry.algorithm)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    tracing::info!(service_id = %request.service_id, "auth accepted");
    Ok(Json(ApiResponse::ok(ServiceConfig {
        dataset_id: entry.dataset_id.clone(),
        algorithm,
        filter_length: entry.filter_length,
        obfuscation_order: entry.obfuscation_order,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use blindquery_ot::{GroupParams, MemoryStore, Responder};

    use crate::config::{ServerConfig, ServiceEntry};

    fn state_with_registry() -> AppState {
        AppState {
            config: Arc::new(ServerConfig::default()),
            store: Arc::new(MemoryStore::new()),
            responder: Arc::new(Responder::new(GroupParams::default())),
            services: Arc::new(vec![ServiceEntry {
                service_id: "svc-1".to_string(),
                access_key: "secret".to_string(),
                dataset_id: "ds-1".to_string(),
                algorithm: 1,
                filter_length: None,
                obfuscation_order: Some(9),
            }]),
        }
    }

    fn request(service_id: &str, access_key: &str) -> Json<AuthRequest> {
        Json(AuthRequest {
            service_id: service_id.to_string(),
            access_key: access_key.to_string(),
        })
    }

    #[tokio::test]
    async fn test_unknown_service_rejected() {
        let result = auth(State(state_with_registry()), request("ghost", "secret")).await;
        assert!(matches!(result, Err(ServerError::UnknownService(_))));
    }

    #[tokio::test]
    async fn test_wrong_access_key_rejected() {
        let result = auth(State(state_with_registry()), request("svc-1", "wrong")).await;
        assert!(matches!(result, Err(ServerError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_matching_credentials_return_service_config() {
        let Json(envelope) = auth(State(state_with_registry()), request("svc-1", "secret"))
            .await
            .unwrap();

        let config = envelope.into_data().unwrap();
        assert_eq!(config.dataset_id, "ds-1");
        assert_eq!(config.algorithm, AlgorithmType::IdObfuscation);
        assert_eq!(config.obfuscation_order, Some(9));
        assert_eq!(config.filter_length, None);
    }
}
