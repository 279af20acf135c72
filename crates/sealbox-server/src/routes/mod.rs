//! API route handlers.

pub mod health;
pub mod protect;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/protect", post(protect::protect))
        .route("/unprotect", post(protect::unprotect))
        .with_state(state)
}
