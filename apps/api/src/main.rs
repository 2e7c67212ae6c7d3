mod config;
mod documents;
mod errors;
mod grading;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::DocumentExtractor;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GROQ_API_KEY or bad values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Grader API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let groq = GroqClient::new(config.llm.clone())?;
    info!(
        "Completion client initialized (model: {}, temperature: {}, max_tokens: {})",
        groq.model(),
        config.llm.temperature,
        config.llm.max_tokens
    );

    let state = AppState {
        completions: Arc::new(groq),
        extractor: Arc::new(DocumentExtractor),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
