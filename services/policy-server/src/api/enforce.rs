//! Enforcement endpoint.
//!
//! # Purpose and responsibility
//! Answers `enforce(user, object, action) -> bool` by delegating to Casbin
//! and echoes the request so callers can correlate answers.
use crate::api::error::{api_internal, ApiError};
use crate::api::types::EnforceResponse;
use crate::app::AppState;
use axum::extract::State;
use axum::Json;
use warden_authz::EnforceRequest;

#[utoipa::path(
    post,
    path = "/api/casbin/enforce",
    tag = "enforce",
    request_body = EnforceRequest,
    responses(
        (status = 200, description = "Enforcement decision", body = EnforceResponse),
        (status = 400, description = "Missing user, object, or action", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn enforce(
    State(state): State<AppState>,
    body: Option<Json<EnforceRequest>>,
) -> Result<Json<EnforceResponse>, ApiError> {
    // An absent or malformed body is reported like any other missing field.
    let request = body.map(|Json(request)| request).unwrap_or_default();
    request.validate()?;
    let allowed = state
        .engine
        .enforce(&request)
        .await
        .map_err(|err| api_internal("failed to enforce permission", &err))?;
    Ok(Json(EnforceResponse { allowed, request }))
}
