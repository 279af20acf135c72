//! Protect and unprotect endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use sealbox_crypto::Envelope;

use crate::{
    dto::{DataParams, ProtectResponse, UnprotectResponse},
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Protect the caller's `data` under the service purpose.
pub async fn protect(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> ApiResult<Json<ProtectResponse>> {
    let data = require_data(params)?;
    let envelope = state.protector.protect(data.as_bytes(), &state.purpose)?;

    Ok(Json(ProtectResponse { protected_data: envelope.encode() }))
}

/// Verify and decrypt a previously protected value.
pub async fn unprotect(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> ApiResult<Json<UnprotectResponse>> {
    let data = require_data(params)?;
    let envelope = Envelope::decode(&data)?;
    let plaintext = state.protector.unprotect(&envelope, &state.purpose)?;

    Ok(Json(UnprotectResponse {
        unprotected_data: String::from_utf8_lossy(&plaintext).into_owned(),
    }))
}

/// The `data` query parameter, rejecting absent and empty values alike.
fn require_data(params: DataParams) -> Result<String, ApiError> {
    params.data.filter(|data| !data.is_empty()).ok_or(ApiError::MissingData)
}
