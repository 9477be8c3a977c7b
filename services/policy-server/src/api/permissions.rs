//! Per-user permission read endpoints.
//!
//! # Purpose and responsibility
//! Reports a user's roles, direct grants, and grants inherited through roles,
//! plus the `action -> [object]` map client authorizers load.
//!
//! # Key invariants and assumptions
//! - Unknown users are not an error; they simply have no roles or grants.
//! - The permission map is always derived from implicit permissions so that
//!   inherited grants are visible to clients.
use crate::api::types::{DetailedPermissionsResponse, UserPermissionsResponse};
use crate::app::AppState;
use axum::extract::{Path, State};
use axum::Json;
use warden_authz::PermissionMap;

#[utoipa::path(
    get,
    path = "/api/casbin/{user}",
    tag = "permissions",
    params(("user" = String, Path, description = "User or role name")),
    responses(
        (status = 200, description = "Objects grouped by action", body = PermissionMap)
    )
)]
pub(crate) async fn permission_map(
    Path(user): Path<String>,
    State(state): State<AppState>,
) -> Json<PermissionMap> {
    Json(state.engine.permission_map(&user).await)
}

#[utoipa::path(
    get,
    path = "/api/casbin/{user}/detailed",
    tag = "permissions",
    params(("user" = String, Path, description = "User or role name")),
    responses(
        (status = 200, description = "Permission map with raw grants", body = DetailedPermissionsResponse)
    )
)]
pub(crate) async fn detailed_permissions(
    Path(user): Path<String>,
    State(state): State<AppState>,
) -> Json<DetailedPermissionsResponse> {
    let grants = state.engine.user_grants(&user).await;
    Json(DetailedPermissionsResponse {
        permissions: PermissionMap::from_rules(&grants.implicit_permissions),
        roles: grants.roles,
        raw_permissions: grants.permissions,
        implicit_permissions: grants.implicit_permissions,
    })
}

#[utoipa::path(
    get,
    path = "/api/casbin/permissions/{user}",
    tag = "permissions",
    params(("user" = String, Path, description = "User or role name")),
    responses(
        (status = 200, description = "Roles and grants", body = UserPermissionsResponse)
    )
)]
pub(crate) async fn user_permissions(
    Path(user): Path<String>,
    State(state): State<AppState>,
) -> Json<UserPermissionsResponse> {
    let grants = state.engine.user_grants(&user).await;
    Json(UserPermissionsResponse {
        user,
        roles: grants.roles,
        permissions: grants.permissions,
        implicit_permissions: grants.implicit_permissions,
    })
}
