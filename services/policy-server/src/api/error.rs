//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction to keep error shapes uniform
//! across policy endpoints.
//!
//! # Key invariants and assumptions
//! - Error bodies carry a stable `code` and a human-readable `error` message.
//! - Status codes must align with the error category.
use crate::api::types::ErrorResponse;
use crate::rbac::engine::EngineError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use warden_authz::AuthzError;

/// Structured API error returned by handlers.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use warden_server::api::error::api_validation_error;
///
/// let err = api_validation_error("Missing required fields: user, object, action");
/// assert_eq!(err.status, StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            error: message.to_string(),
        },
    }
}

/// Build a 400 Bad Request validation error.
pub fn api_validation_error(message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not_found", message)
}

/// Build a 500 Internal Server Error from an engine failure.
///
/// The library message is returned to the caller, matching what the browser
/// client displays; the full error is also logged.
pub fn api_internal(context: &str, err: &EngineError) -> ApiError {
    tracing::error!(error = ?err, "{context}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", &err.to_string())
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::MissingFields(_) | AuthzError::InvalidRule { .. } => {
                api_validation_error(&err.to_string())
            }
            other => api_internal("authorization failure", &EngineError::Authz(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_helpers_build_expected_codes() {
        let validation = api_validation_error("bad");
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.body.code, "validation_error");
        assert_eq!(validation.body.error, "bad");

        let not_found = api_not_found("missing");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.body.code, "not_found");
    }

    #[test]
    fn missing_fields_map_to_bad_request() {
        let api: ApiError = AuthzError::MissingFields("user, object, action").into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api.body.error,
            "Missing required fields: user, object, action"
        );
    }

    #[test]
    fn api_internal_logs_and_wraps_engine_error() {
        let err = EngineError::Authz(AuthzError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )));
        let api = api_internal("failed to save policy", &err);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.body.code, "internal");
        assert!(api.body.error.contains("disk full"));
    }
}
