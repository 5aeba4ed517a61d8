//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the served cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Seed a couple of demo entries at startup
    pub seed_demo_entries: bool,
    /// Value of the `cache_type` label on emitted metrics
    pub cache_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SEED_DEMO_ENTRIES` - Seed `foo` and `baz` at startup (default: true)
    /// - `CACHE_NAME` - Metrics label for the cache (default: safe_lru)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            seed_demo_entries: parse_var("SEED_DEMO_ENTRIES")
                .unwrap_or(defaults.seed_demo_entries),
            cache_name: env::var("CACHE_NAME")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.cache_name),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 5,
            server_port: 8080,
            seed_demo_entries: true,
            cache_name: "safe_lru".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
