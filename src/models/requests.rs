//! Request DTOs for the cache HTTP wrapper
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /add
///
/// Stored with an unconditional `set`: no TTL is accepted here.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl AddRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() || self.value.is_empty() {
            return Some("key and value must not be empty".to_string());
        }
        None
    }
}
