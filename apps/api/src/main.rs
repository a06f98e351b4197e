mod config;
mod db;
mod errors;
mod ingest;
mod jd;
mod llm_client;
mod matching;
mod models;
mod profile;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::llm_client::LlmClient;
use crate::profile::normalizer::{DeterministicNormalizer, LlmNormalizer, ProfileNormalizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting VetStack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and make sure the store schema exists
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    // Pick the profile normalizer: deterministic unless LLM enrichment is
    // switched on and an API key is present.
    let normalizer: Arc<dyn ProfileNormalizer> = match (
        config.enable_llm_normalizer,
        config.anthropic_api_key.clone(),
    ) {
        (true, Some(api_key)) => {
            info!("Profile normalizer: LLM-enriched (model: {})", llm_client::MODEL);
            Arc::new(LlmNormalizer::new(LlmClient::new(api_key)))
        }
        (true, None) => {
            tracing::warn!(
                "ENABLE_LLM_NORMALIZER set without ANTHROPIC_API_KEY; using deterministic normalizer"
            );
            Arc::new(DeterministicNormalizer)
        }
        _ => {
            info!("Profile normalizer: deterministic");
            Arc::new(DeterministicNormalizer)
        }
    };

    let state = AppState {
        db: pool,
        config: config.clone(),
        normalizer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
