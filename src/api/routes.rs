//! API Routes
//!
//! Configures the Axum router for the cache wrapper.

use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{add_handler, cache_handler, health_handler, stats_handler, AppState};
use crate::cache::{EXPIRATION_BUCKETS, EXPIRATION_SECONDS};
use crate::error::{CacheError, Result};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cache` - Full cache contents, most recently used first
/// - `POST /add` - Store a key-value pair with no expiration
/// - `GET /stats` - In-process cache counters
/// - `GET /health` - Health check endpoint
/// - `GET /metrics` - Prometheus exposition, only when `metrics` is given
///
/// # Middleware
/// - CORS: Any origin, `GET`/`POST`/`OPTIONS`, `Content-Type` header
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/cache", get(cache_handler))
        .route("/add", post(add_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(handle),
        );
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// Handler for GET /metrics
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Installs the global Prometheus recorder behind the `metrics` facade and
/// returns the handle `/metrics` renders from.
///
/// # Errors
/// Returns [`CacheError::Internal`] if the TTL histogram buckets are rejected
/// or a global recorder is already installed.
pub fn install_metrics_recorder() -> Result<PrometheusHandle> {
    prometheus_builder(EXPIRATION_BUCKETS)?
        .install_recorder()
        .map_err(|err| {
            CacheError::Internal(format!("failed to install metrics recorder: {}", err))
        })
}

fn prometheus_builder(ttl_buckets: &[f64]) -> Result<PrometheusBuilder> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(EXPIRATION_SECONDS.to_string()), ttl_buckets)
        .map_err(|err| CacheError::Internal(format!("invalid metrics buckets: {}", err)))
}
