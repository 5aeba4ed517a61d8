//! Mini LRU - An in-process LRU cache with TTL expiration
//!
//! Provides a bounded, thread-safe key/value cache with least-recently-used
//! eviction and lazy TTL expiration, plus a small HTTP backend exposing a
//! snapshot of its recency order.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use cache::{Cache, LruCache, SetStatus, SharedCache, Snapshot};
pub use config::Config;
pub use error::{CacheError, Result};
