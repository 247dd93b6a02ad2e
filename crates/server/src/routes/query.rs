//! Blind query endpoint

use axum::{extract::State, Json};
use rand::rngs::OsRng;

use blindquery_protocol::{ApiResponse, QueryRequest, QueryResponse};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// POST /v1/pir/query - run the blind responder over one job batch.
///
/// The modular exponentiations are CPU-bound, so the batch runs on the
/// blocking pool.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ApiResponse<QueryResponse>>> {
    if request.items.is_empty() {
        return Err(ServerError::InvalidRequest("empty item list".to_string()));
    }
    if request.items.len() > state.config.max_batch_size {
        return Err(ServerError::BatchTooLarge {
            size: request.items.len(),
            max: state.config.max_batch_size,
        });
    }

    tracing::info!(
        job_id = %request.job_id,
        dataset = %request.dataset_id,
        items = request.items.len(),
        "query job received"
    );

    let responder = state.responder.clone();
    let store = state.store.clone();
    let response = tokio::task::spawn_blocking(move || {
        responder.respond(store.as_ref(), &request, &mut OsRng)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("task join error: {}", e)))??;

    Ok(Json(ApiResponse::ok(response)))
}
