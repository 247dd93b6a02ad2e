//! API routes

pub mod auth;
pub mod health;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/pir/info", get(health::info))
        .route("/v1/pir/auth", post(auth::auth))
        .route("/v1/pir/query", post(query::query))
        .with_state(state)
}
