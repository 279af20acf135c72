//! Sealbox protection service.
//!
//! HTTP boundary over the [`sealbox_crypto`] engine. The service
//! exposes two operations - `POST /protect` and `POST /unprotect` -
//! that seal and recover caller-supplied strings under a
//! server-configured purpose, plus a `GET /health` probe.
//!
//! # Architecture
//!
//! The core engine is synchronous, CPU-only, and lock-free; this crate
//! supplies the production glue: an axum router, request/response
//! shaping, tracing, HTTPS redirection, and key-ring provisioning. One
//! immutable [`AppState`] (holding the ring behind an `Arc`) is cloned
//! into every handler - explicit construction, no global registry.
//!
//! # Error mapping
//!
//! Every failed unprotect - malformed envelope, unknown key, failed
//! authentication - produces the identical response body, so callers
//! cannot probe why verification failed. Only an empty ring surfaces
//! as a server error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dto;
mod error;
mod middleware;
mod provision;
mod routes;
mod state;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::{
    ApiError, ApiResult, MISSING_DATA, ServerError, UNPROTECT_DETAILS, UNPROTECT_ERROR,
};
pub use provision::{ephemeral_key_ring, load_key_ring};
pub use routes::create_router;
pub use state::{AppState, ServiceConfig};

/// Build the service router with middleware applied.
pub fn build_router(state: AppState, https_redirect: bool) -> Router {
    let mut router = create_router(state).layer(TraceLayer::new_for_http());

    if https_redirect {
        router = router.layer(axum::middleware::from_fn(middleware::redirect_to_https));
    }

    router
}

/// Run the service until shutdown.
///
/// # Errors
///
/// `Config` for an unparsable bind address, `Transport` for bind/serve
/// failures.
pub async fn run_server(
    config: ServiceConfig,
    ring: sealbox_crypto::KeyRing,
) -> Result<(), ServerError> {
    let state = AppState::new(ring, &config.purpose);
    let router = build_router(state, config.https_redirect);

    let addr: SocketAddr = config.bind_address.parse().map_err(|err| {
        ServerError::Config(format!("invalid bind address {}: {err}", config.bind_address))
    })?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Sealbox server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
