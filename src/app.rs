use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::events::EventBus;
use crate::naming::{EntityNameResolver, InMemoryNameResolver};
use crate::routes::{guards, health, overrides, permissions};
use crate::snapshot::PermissionSnapshot;

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<PermissionSnapshot>,
    pub names: Arc<dyn EntityNameResolver>,
    pub event_bus: EventBus,
}

impl AppState {
    /// State whose name lookups are served from the snapshot's own directory.
    pub fn new(snapshot: PermissionSnapshot, event_bus: EventBus) -> Self {
        let names = InMemoryNameResolver::new(snapshot.names.clone());
        Self {
            snapshot: Arc::new(snapshot),
            names: Arc::new(names),
            event_bus,
        }
    }

    pub fn with_name_resolver(mut self, names: Arc<dyn EntityNameResolver>) -> Self {
        self.names = names;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/permissions/resolve", post(permissions::resolve_permissions))
        .route("/users/:user_id/permissions", get(permissions::permission_summary))
        .route("/guards/check", post(guards::check_guard))
        .route("/overrides/:override_id/targets", get(overrides::override_targets))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
