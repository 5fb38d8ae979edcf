use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::authz::{AccessDecision, DenialReason};
use crate::models;
use crate::naming::{OverrideTargets, TargetLabel};
use crate::routes::{guards, health, overrides, permissions};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        permissions::resolve_permissions,
        permissions::permission_summary,
        guards::check_guard,
        overrides::override_targets
    ),
    components(
        schemas(
            models::EntityType,
            models::Action,
            models::PermissionSet,
            models::PartialPermissionSet,
            models::OverrideScope,
            models::GroupPermissionOverride,
            models::Role,
            models::Group,
            models::User,
            AccessDecision,
            DenialReason,
            OverrideTargets,
            TargetLabel,
            health::HealthResponse,
            permissions::ResolveRequest,
            permissions::ResolveResponse,
            permissions::PermissionSummary,
            guards::GuardCheckRequest
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Permissions", description = "Effective permission resolution"),
        (name = "Guards", description = "Ownership-gated action checks"),
        (name = "Overrides", description = "Override target labels")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with a `servers` entry for the local port.
pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
    let mut doc = serde_json::to_value(ApiDoc::openapi())?;

    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            "servers".to_string(),
            json!([{ "url": format!("http://localhost:{port}"), "description": "Local server" }]),
        );
    }

    Ok(serde_json::from_value(doc)?)
}

/// Serves the document at `/api-docs/openapi.json` and Swagger UI at `/docs`.
pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> anyhow::Result<Router> {
    let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"]).try_it_out_enabled(true);

    let doc_json: Arc<Value> = Arc::new(serde_json::to_value(&doc)?);

    let json_route = get(move || {
        let doc_json = Arc::clone(&doc_json);
        async move { Json((*doc_json).clone()) }
    });

    Ok(Router::new()
        .route("/api-docs/openapi.json", json_route)
        .merge(SwaggerUi::new("/docs").config(swagger_config)))
}
