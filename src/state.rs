use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::stats::StatsClient;

/// Shared application state handed to every handler via `State`.
/// The pool is the sole shared mutation point; config is read-only.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub stats: StatsClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let stats = StatsClient::new(config.stats.base_url.clone());
        Self {
            pool,
            config: Arc::new(config),
            stats,
        }
    }
}
