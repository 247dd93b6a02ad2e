//! Health and info endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    version: String,
    dataset_id: String,
    dataset_rows: usize,
    max_batch_size: usize,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /v1/pir/info
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_id: state.config.dataset_id.clone(),
        dataset_rows: state.dataset_len(),
        max_batch_size: state.config.max_batch_size,
    })
}
