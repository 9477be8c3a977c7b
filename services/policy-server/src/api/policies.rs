//! Policy listing and mutation endpoints.
//!
//! # Purpose and responsibility
//! Lists `p`/`g` rules and adds or removes them through the Casbin
//! management API.
//!
//! # Key invariants and assumptions
//! - Adding an existing rule or removing an absent one is not an error; the
//!   response reports `success: false`.
//! - Every field of a rule must be present and non-empty.
use crate::api::error::{api_internal, ApiError};
use crate::api::types::{GroupingChangeResponse, PoliciesResponse, PolicyChangeResponse};
use crate::app::AppState;
use axum::extract::State;
use axum::Json;
use warden_authz::{GroupingRule, PolicyRule};

#[utoipa::path(
    get,
    path = "/api/casbin/policies",
    tag = "policies",
    responses((status = 200, description = "All policy and grouping rules", body = PoliciesResponse))
)]
pub(crate) async fn list_policies(State(state): State<AppState>) -> Json<PoliciesResponse> {
    let snapshot = state.engine.snapshot().await;
    Json(PoliciesResponse {
        policies: snapshot.policies,
        grouping_policies: snapshot.grouping_policies,
    })
}

#[utoipa::path(
    post,
    path = "/api/casbin/add-policy",
    tag = "policies",
    request_body = PolicyRule,
    responses(
        (status = 200, description = "Whether the rule was added", body = PolicyChangeResponse),
        (status = 400, description = "Missing rule fields", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn add_policy(
    State(state): State<AppState>,
    body: Option<Json<PolicyRule>>,
) -> Result<Json<PolicyChangeResponse>, ApiError> {
    let rule = body.map(|Json(rule)| rule).unwrap_or_default();
    rule.validate()?;
    let success = state
        .engine
        .add_policy(&rule)
        .await
        .map_err(|err| api_internal("failed to add policy", &err))?;
    tracing::info!(subject = %rule.subject, object = %rule.object, action = %rule.action, success, "add policy");
    Ok(Json(PolicyChangeResponse {
        success,
        policy: rule.to_params(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/casbin/remove-policy",
    tag = "policies",
    request_body = PolicyRule,
    responses(
        (status = 200, description = "Whether the rule was removed", body = PolicyChangeResponse),
        (status = 400, description = "Missing rule fields", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn remove_policy(
    State(state): State<AppState>,
    body: Option<Json<PolicyRule>>,
) -> Result<Json<PolicyChangeResponse>, ApiError> {
    let rule = body.map(|Json(rule)| rule).unwrap_or_default();
    rule.validate()?;
    let success = state
        .engine
        .remove_policy(&rule)
        .await
        .map_err(|err| api_internal("failed to remove policy", &err))?;
    tracing::info!(subject = %rule.subject, object = %rule.object, action = %rule.action, success, "remove policy");
    Ok(Json(PolicyChangeResponse {
        success,
        policy: rule.to_params(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/casbin/add-grouping",
    tag = "policies",
    request_body = GroupingRule,
    responses(
        (status = 200, description = "Whether the role assignment was added", body = GroupingChangeResponse),
        (status = 400, description = "Missing rule fields", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn add_grouping(
    State(state): State<AppState>,
    body: Option<Json<GroupingRule>>,
) -> Result<Json<GroupingChangeResponse>, ApiError> {
    let rule = body.map(|Json(rule)| rule).unwrap_or_default();
    rule.validate()?;
    let success = state
        .engine
        .add_grouping(&rule)
        .await
        .map_err(|err| api_internal("failed to add grouping", &err))?;
    tracing::info!(user = %rule.user, role = %rule.role, success, "add grouping");
    Ok(Json(GroupingChangeResponse {
        success,
        grouping: rule.to_params(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/casbin/remove-grouping",
    tag = "policies",
    request_body = GroupingRule,
    responses(
        (status = 200, description = "Whether the role assignment was removed", body = GroupingChangeResponse),
        (status = 400, description = "Missing rule fields", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn remove_grouping(
    State(state): State<AppState>,
    body: Option<Json<GroupingRule>>,
) -> Result<Json<GroupingChangeResponse>, ApiError> {
    let rule = body.map(|Json(rule)| rule).unwrap_or_default();
    rule.validate()?;
    let success = state
        .engine
        .remove_grouping(&rule)
        .await
        .map_err(|err| api_internal("failed to remove grouping", &err))?;
    tracing::info!(user = %rule.user, role = %rule.role, success, "remove grouping");
    Ok(Json(GroupingChangeResponse {
        success,
        grouping: rule.to_params(),
    }))
}
