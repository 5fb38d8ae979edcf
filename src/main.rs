use anyhow::Context;

use permission_engine::config::{load_env, AppConfig};
use permission_engine::events::{init_event_bus, start_decision_listener};
use permission_engine::{create_app, docs, AppState, PermissionSnapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();

    let config = AppConfig::from_env()?;
    let snapshot = PermissionSnapshot::load(&config.snapshot_path)
        .with_context(|| format!("failed to load snapshot from {}", config.snapshot_path.display()))?;

    for issue in snapshot.membership_issues() {
        tracing::warn!(%issue, "snapshot inconsistency");
    }

    let (event_bus, event_rx) = init_event_bus();
    tokio::spawn(start_decision_listener(event_rx));

    let state = AppState::new(snapshot, event_bus);
    let openapi = docs::build_openapi(config.port)?;
    let app = create_app(state).merge(docs::swagger_routes(openapi)?);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
