//! Region map engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use regionmap_engine::{
    api,
    config::{load_dotenv_from_repo_root, EngineConfig},
    infrastructure::{
        clock::SystemClock,
        memory::InMemoryRegionDocuments,
        ports::{ClockPort, RegionDocumentRepo},
        region_documents::SqliteRegionDocuments,
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regionmap_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting region map engine");

    let config = EngineConfig::from_env();

    let documents: Arc<dyn RegionDocumentRepo> = if config.uses_in_memory_store() {
        tracing::warn!("Using in-memory region documents; changes are lost on exit");
        Arc::new(InMemoryRegionDocuments::new())
    } else {
        tracing::info!(db_path = %config.db_path, "Opening region documents");
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        Arc::new(SqliteRegionDocuments::new(&config.db_path, clock).await?)
    };

    let app = Arc::new(App::new(documents));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        // The editor sends JSON bodies, which trigger CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
