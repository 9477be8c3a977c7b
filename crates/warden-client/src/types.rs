// Response shapes decoded from the policy server.
use serde::{Deserialize, Serialize};
use warden_authz::{EnforceRequest, PermissionMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub user: String,
    pub roles: Vec<String>,
    pub permissions: Vec<Vec<String>>,
    pub implicit_permissions: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPermissions {
    pub permissions: PermissionMap,
    pub roles: Vec<String>,
    pub raw_permissions: Vec<Vec<String>>,
    pub implicit_permissions: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforceResponse {
    pub allowed: bool,
    pub request: EnforceRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policies {
    pub policies: Vec<Vec<String>>,
    pub grouping_policies: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyChange {
    pub success: bool,
    pub policy: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingChange {
    pub success: bool,
    pub grouping: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
