use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::mitra::backend::ReplyBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable Mitra reply backend. OpenAI when an API key is configured,
    /// otherwise the offline fallback. Selected once at startup.
    pub mitra: Arc<dyn ReplyBackend>,
}
