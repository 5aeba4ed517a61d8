//! API Handlers
//!
//! HTTP request handlers for each endpoint of the cache wrapper.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;

use crate::cache::{FacadeReporter, LruCache, MetricsReporter, SharedCache, Snapshot, StatsReporter};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{AddRequest, HealthResponse, StatsResponse};

/// The cache served over HTTP.
pub type ServedCache = SharedCache<LruCache<String, String>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<ServedCache>,
    /// In-process counters fed by the cache
    pub stats: Arc<StatsReporter>,
}

impl AppState {
    /// Creates a new AppState around `cache`, whose engine must report to `stats`.
    pub fn new(cache: ServedCache, stats: Arc<StatsReporter>) -> Self {
        Self {
            cache: Arc::new(cache),
            stats,
        }
    }

    /// Creates a cache of `capacity` entries reporting only to the in-process counters.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let stats = Arc::new(StatsReporter::new());
        let engine = LruCache::new(capacity)?.with_reporter(stats.clone());
        Ok(Self::new(SharedCache::new(engine), stats))
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache reports both to the in-process counters and to the
    /// `metrics` facade, labelled with `config.cache_name`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let stats = Arc::new(StatsReporter::new());
        let reporter: Arc<dyn MetricsReporter> = Arc::new((
            stats.clone(),
            FacadeReporter::new(config.cache_name.clone()),
        ));
        let engine = LruCache::new(config.capacity)?.with_reporter(reporter);
        Ok(Self::new(SharedCache::new(engine), stats))
    }
}

/// Handler for GET /cache
///
/// Returns the full cache contents, most recently used first.
pub async fn cache_handler(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.cache.snapshot())
}

/// Handler for POST /add
///
/// Stores a key-value pair with no expiration.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<StatusCode> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let status = state.cache.set(req.key, req.value);
    debug!(status = status.as_str(), "stored submitted entry");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns the in-process lookup counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.stats.snapshot();
    Json(StatsResponse::new(&stats, state.cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
