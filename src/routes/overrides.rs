use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::naming::{describe_override, OverrideTargets};

/// Display labels for the entities a specific-scope override targets
#[utoipa::path(
    get,
    path = "/overrides/{override_id}/targets",
    tag = "Overrides",
    params(("override_id" = Uuid, Path, description = "Override id")),
    responses(
        (status = 200, description = "Resolved targets and orphaned ids", body = OverrideTargets),
        (status = 404, description = "Override not found"),
    )
)]
pub async fn override_targets(
    State(state): State<AppState>,
    Path(override_id): Path<Uuid>,
) -> AppResult<Json<OverrideTargets>> {
    let override_rule = state
        .snapshot
        .override_rule(override_id)
        .ok_or_else(|| AppError::not_found("override not found"))?;

    let targets = describe_override(state.names.as_ref(), override_rule).await;
    Ok(Json(targets))
}
