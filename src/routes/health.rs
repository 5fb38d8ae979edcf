use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub roles: usize,
    pub users: usize,
    pub overrides: usize,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = &state.snapshot;
    Json(HealthResponse {
        status: "ok",
        roles: snapshot.roles.len(),
        users: snapshot.users.len(),
        overrides: snapshot.overrides.len(),
    })
}
