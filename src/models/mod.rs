//! Request and Response models for the cache HTTP wrapper
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.
//! The `GET /cache` body is [`Snapshot`](crate::cache::Snapshot) itself.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::AddRequest;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
