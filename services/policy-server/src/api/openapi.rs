//! OpenAPI schema aggregation for the policy API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for docs
//! and client generation.
use crate::api::{
    enforce, permissions, policies, system,
    types::{
        DetailedPermissionsResponse, EnforceResponse, ErrorResponse, GroupingChangeResponse,
        HealthStatus, PoliciesResponse, PolicyChangeResponse, UserPermissionsResponse,
    },
};
use utoipa::OpenApi;
use warden_authz::{EnforceRequest, GroupingRule, PermissionMap, PolicyRule};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "warden-server",
        version = "v1",
        description = "Casbin RBAC policy and enforcement HTTP API"
    ),
    paths(
        system::health,
        permissions::permission_map,
        permissions::detailed_permissions,
        permissions::user_permissions,
        enforce::enforce,
        policies::list_policies,
        policies::add_policy,
        policies::remove_policy,
        policies::add_grouping,
        policies::remove_grouping
    ),
    components(schemas(
        HealthStatus,
        ErrorResponse,
        PermissionMap,
        DetailedPermissionsResponse,
        UserPermissionsResponse,
        EnforceRequest,
        EnforceResponse,
        PoliciesResponse,
        PolicyRule,
        PolicyChangeResponse,
        GroupingRule,
        GroupingChangeResponse
    )),
    tags(
        (name = "system", description = "Health and discovery"),
        (name = "permissions", description = "Per-user roles and grants"),
        (name = "enforce", description = "Enforcement decisions"),
        (name = "policies", description = "Policy and role assignment management")
    )
)]
pub struct ApiDoc;
