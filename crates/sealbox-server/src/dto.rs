//! Request and response shapes for the protection API.
//!
//! Field names are part of the wire contract (`ProtectedData`,
//! `UnprotectedData`, `Error`, `Details`) and must not be renamed.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by both protection endpoints.
#[derive(Debug, Deserialize)]
pub struct DataParams {
    /// The value to protect, or the encoded envelope to unprotect
    pub data: Option<String>,
}

/// Successful protect response.
#[derive(Debug, Serialize)]
pub struct ProtectResponse {
    /// The encoded envelope
    #[serde(rename = "ProtectedData")]
    pub protected_data: String,
}

/// Successful unprotect response.
#[derive(Debug, Serialize)]
pub struct UnprotectResponse {
    /// The recovered plaintext
    #[serde(rename = "UnprotectedData")]
    pub unprotected_data: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short client-facing error
    #[serde(rename = "Error")]
    pub error: String,
    /// Generic detail; never names the underlying cause
    #[serde(rename = "Details")]
    pub details: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Number of keys in the ring
    pub keys: usize,
}
