use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{AccessDecision, GuardRequest};
use crate::events::{log_decision, RequestContext};
use crate::models::{Action, EntityType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuardCheckRequest {
    pub user_id: Uuid,
    pub entity_type: EntityType,
    pub action: Action,
    #[schema(example = "site-1")]
    pub resource_id: Option<String>,
    /// Creator of the resource, for ownership-gated actions
    pub creator_id: Option<Uuid>,
}

/// Run the ownership guard and resolver for one action.
///
/// Always 200: a denial is a normal answer, carried in the body with its reason.
#[utoipa::path(
    post,
    path = "/guards/check",
    tag = "Guards",
    request_body = GuardCheckRequest,
    responses((status = 200, description = "Guard decision", body = AccessDecision))
)]
pub async fn check_guard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GuardCheckRequest>,
) -> Json<AccessDecision> {
    let mut request = GuardRequest::new(req.entity_type, req.action).created_by(req.creator_id);
    request.resource_id = req.resource_id.as_deref();

    let decision = state.snapshot.authorize_user(req.user_id, request);

    log_decision(
        &state.event_bus,
        req.user_id,
        &request,
        &decision,
        Some(RequestContext::from_headers(&headers)),
    );

    Json(decision)
}
