//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Number of stored listings.
    pub listings: usize,
}

/// Health check endpoint. Fails with 500 when the store cannot be read.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        service: "pawhub".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        listings: state.store.count()?,
    }))
}
