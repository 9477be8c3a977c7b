//! System/health API handlers.
//!
//! # Purpose and responsibility
//! Provides the liveness endpoint and the JSON fallback for unknown routes.
//!
//! # Key invariants and assumptions
//! - Health checks must be fast and side-effect free.
use crate::api::error::{api_not_found, ApiError};
use crate::api::types::HealthStatus;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Service liveness", body = HealthStatus)
    )
)]
/// Return service health.
///
/// The enforcer is built before the listener binds, so a responding process
/// always has a usable policy.
pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        message: "Backend is running".to_string(),
    })
}

pub(crate) async fn not_found() -> ApiError {
    api_not_found("route not found")
}
