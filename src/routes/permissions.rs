use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{resolve_all, resolve_traced};
use crate::errors::{AppError, AppResult};
use crate::models::{EntityType, PermissionSet};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    pub user_id: Uuid,
    pub entity_type: EntityType,
    /// Required for scope=specific overrides to take effect
    #[schema(example = "site-1")]
    pub entity_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveResponse {
    pub user_id: Uuid,
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub permissions: PermissionSet,
    pub role_default: PermissionSet,
    pub role_found: bool,
    pub applied_overrides: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionSummary {
    pub user_id: Uuid,
    pub role_id: String,
    #[schema(value_type = Object)]
    pub permissions: BTreeMap<EntityType, PermissionSet>,
}

#[utoipa::path(
    post,
    path = "/permissions/resolve",
    tag = "Permissions",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Effective permissions", body = ResolveResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn resolve_permissions(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> AppResult<Json<ResolveResponse>> {
    let snapshot = &state.snapshot;
    let user = snapshot
        .user(req.user_id)
        .ok_or_else(|| AppError::not_found("user not found"))?;

    let resolution = resolve_traced(
        user,
        req.entity_type,
        req.entity_id.as_deref(),
        &snapshot.overrides,
        &snapshot.roles,
    );

    Ok(Json(ResolveResponse {
        user_id: user.id,
        entity_type: req.entity_type,
        entity_id: req.entity_id,
        permissions: resolution.effective,
        role_default: resolution.base,
        role_found: resolution.role_found,
        applied_overrides: resolution.applied_overrides,
    }))
}

/// Role defaults plus "all" overrides for every resource kind
#[utoipa::path(
    get,
    path = "/users/{user_id}/permissions",
    tag = "Permissions",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Permission summary", body = PermissionSummary),
        (status = 404, description = "User not found"),
    )
)]
pub async fn permission_summary(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<PermissionSummary>> {
    let snapshot = &state.snapshot;
    let user = snapshot
        .user(user_id)
        .ok_or_else(|| AppError::not_found("user not found"))?;

    Ok(Json(PermissionSummary {
        user_id,
        role_id: user.role_id.clone(),
        permissions: resolve_all(user, &snapshot.overrides, &snapshot.roles),
    }))
}
