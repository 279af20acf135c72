//! Server error types and their client-facing mapping.
//!
//! Core failures carry precise variants; the HTTP boundary collapses
//! every unprotect failure into one identical body so a caller cannot
//! learn whether a rejected envelope was malformed, referenced an
//! unknown key, or failed its authentication tag. The concrete cause is
//! logged server-side only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sealbox_crypto::ProtectError;
use thiserror::Error;

use crate::dto::ErrorResponse;

/// Client-facing error for every failed unprotect.
pub const UNPROTECT_ERROR: &str = "Invalid or expired data!";

/// Client-facing detail for every failed unprotect. A fixed constant;
/// the underlying cause is never echoed to the caller.
pub const UNPROTECT_DETAILS: &str = "data could not be verified";

/// Usage message for requests without a usable `data` parameter.
pub const MISSING_DATA: &str = "Please provide 'data' in the query string!";

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The `data` query parameter was absent or empty.
    #[error("missing 'data' query parameter")]
    MissingData,

    /// The protection engine rejected the request.
    #[error(transparent)]
    Protect(#[from] ProtectError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingData => (StatusCode::BAD_REQUEST, MISSING_DATA).into_response(),

            Self::Protect(ProtectError::NoActiveKey) => {
                tracing::error!("protect failed: no active key in the ring");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                        details: "unable to protect data".to_string(),
                    }),
                )
                    .into_response()
            },

            Self::Protect(err) => {
                // Cause stays in the log; the response body is identical
                // for malformed, unknown-key, and failed-tag envelopes
                tracing::debug!("unprotect rejected: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: UNPROTECT_ERROR.to_string(),
                        details: UNPROTECT_DETAILS.to_string(),
                    }),
                )
                    .into_response()
            },
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that prevent the server from starting.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (invalid bind address, bad flags).
    #[error("configuration error: {0}")]
    Config(String),

    /// The key file could not be read or parsed.
    #[error("key file error: {0}")]
    KeyFile(String),

    /// Transport/network error (bind failure, I/O error).
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprotect_failures_map_to_identical_responses() {
        let auth = ApiError::Protect(ProtectError::AuthenticationFailed).into_response();
        let malformed =
            ApiError::Protect(ProtectError::MalformedEnvelope { reason: "envelope too short" })
                .into_response();

        assert_eq!(auth.status(), StatusCode::BAD_REQUEST);
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn no_active_key_is_a_server_error() {
        let response = ApiError::Protect(ProtectError::NoActiveKey).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_data_is_a_client_error() {
        let response = ApiError::MissingData.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
