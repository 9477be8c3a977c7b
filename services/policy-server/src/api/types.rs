//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes for the policy REST API and OpenAPI schema
//! generation. Field names follow the camelCase wire format the browser
//! client already consumes.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_authz::{EnforceRequest, PermissionMap};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPermissionsResponse {
    pub permissions: PermissionMap,
    pub roles: Vec<String>,
    pub raw_permissions: Vec<Vec<String>>,
    pub implicit_permissions: Vec<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionsResponse {
    pub user: String,
    pub roles: Vec<String>,
    pub permissions: Vec<Vec<String>>,
    pub implicit_permissions: Vec<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EnforceResponse {
    pub allowed: bool,
    pub request: EnforceRequest,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PoliciesResponse {
    pub policies: Vec<Vec<String>>,
    pub grouping_policies: Vec<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PolicyChangeResponse {
    pub success: bool,
    pub policy: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct GroupingChangeResponse {
    pub success: bool,
    pub grouping: Vec<String>,
}
