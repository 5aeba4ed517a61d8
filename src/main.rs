//! Mini LRU - cache visualizer backend
//!
//! Serves a small LRU cache over HTTP so a front end can watch its recency
//! order change as entries are added.

use std::net::SocketAddr;

use anyhow::Context;
use chrono::Duration;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::api::install_metrics_recorder;
use mini_lru::{create_router, AppState, Config};

/// Main entry point for the Mini LRU server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Install the Prometheus metrics recorder
/// 4. Create the shared cache and seed demo entries
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_lru=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini LRU server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, port={}, seed_demo_entries={}, cache_name={}",
        config.capacity, config.server_port, config.seed_demo_entries, config.cache_name
    );

    let metrics = install_metrics_recorder().context("failed to set up metrics")?;

    let state = AppState::from_config(&config).context("failed to create cache")?;
    if config.seed_demo_entries {
        state.cache.set("foo".to_string(), "bar".to_string());
        state
            .cache
            .set_with_ttl("baz".to_string(), "qux".to_string(), Duration::minutes(1));
        info!("Seeded {} demo entries", state.cache.len());
    }

    let app = create_router(state, Some(metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
