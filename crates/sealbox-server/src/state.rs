//! Application state for the protection service.

use std::sync::Arc;

use sealbox_crypto::{KeyRing, Protector};

/// Shared state handed to every request handler.
///
/// The ring is immutable for the process lifetime, so handlers run
/// fully in parallel with no locks on the cryptographic path.
#[derive(Clone)]
pub struct AppState {
    /// Ring-aware protection engine
    pub protector: Arc<Protector>,
    /// Purpose string isolating this service's protected data
    pub purpose: Arc<str>,
    /// Service version
    pub version: String,
}

impl AppState {
    /// Create state from a provisioned key ring and purpose.
    pub fn new(ring: KeyRing, purpose: &str) -> Self {
        Self {
            protector: Arc::new(Protector::new(Arc::new(ring))),
            purpose: Arc::from(purpose),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Service configuration consumed by [`crate::run_server`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080")
    pub bind_address: String,
    /// Purpose string for all protect/unprotect calls
    pub purpose: String,
    /// Whether plain-HTTP requests are redirected to HTTPS
    pub https_redirect: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            purpose: "SamplePurpose".to_string(),
            https_redirect: true,
        }
    }
}
