use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use chunk_api_server::chunker::ModelLimitRegistry;
use chunk_api_server::config::Settings;
use chunk_api_server::handlers;
use chunk_api_server::tokenizer::{HfTokenizerProvider, TextEncoder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,chunk_api_server=debug".to_string()),
        )
        .with_target(true)
        .json()
        .init();

    info!("Starting Chunk API server...");

    let settings = Settings::load()?;
    info!("Configuration loaded");

    // Built-in model limits plus configuration overrides
    let mut registry = ModelLimitRegistry::default();
    registry.extend(&settings.chunker.model_limits);
    let registry = Arc::new(registry);

    let encoder: Arc<dyn TextEncoder> = Arc::new(HfTokenizerProvider::new());
    let settings = Arc::new(settings);

    let app = build_router(encoder, registry, settings.clone());

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(
    encoder: Arc<dyn TextEncoder>,
    registry: Arc<ModelLimitRegistry>,
    settings: Arc<Settings>,
) -> Router {
    let max_body_bytes = settings.server.max_body_bytes;

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/chunk", post(handlers::chunk::chunk_handler))
        // Shared state
        .layer(Extension(encoder))
        .layer(Extension(registry))
        .layer(Extension(settings))
        // CORS (permissive, same as the upstream service)
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
