use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::profile::normalizer::ProfileNormalizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable profile normalizer. Default: DeterministicNormalizer.
    /// Swap via ENABLE_LLM_NORMALIZER + ANTHROPIC_API_KEY.
    pub normalizer: Arc<dyn ProfileNormalizer>,
}
