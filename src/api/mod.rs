//! API Module
//!
//! Thin HTTP wrapper exposing the cache to a visualizer front end.
//!
//! # Endpoints
//! - `GET /cache` - Snapshot of the cache in recency order
//! - `POST /add` - Store a key-value pair
//! - `GET /stats` - In-process cache counters
//! - `GET /health` - Health check endpoint
//! - `GET /metrics` - Prometheus exposition (when a recorder is installed)

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, install_metrics_recorder};
