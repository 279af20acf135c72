//! Health check endpoint.

use axum::{Json, extract::State};

use crate::{dto::HealthResponse, state::AppState};

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        keys: state.protector.ring().len(),
    })
}
