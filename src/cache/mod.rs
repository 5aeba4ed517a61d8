//! Cache Module
//!
//! Bounded in-memory cache with LRU eviction and lazy TTL expiration.
//!
//! - [`LruCache`] is the single-threaded engine.
//! - [`SharedCache`] serializes access to any [`Cache`] behind one lock.
//! - [`Snapshot`] renders the recency order for display.

mod clock;
mod entry;
mod lru;
mod reporter;
mod shared;
mod snapshot;
mod stats;
mod store;
mod traits;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{has_expired, CacheEntry};
pub use lru::{NodeHandle, RecencyList};
pub use reporter::{
    EvictionReason, FacadeReporter, MetricsReporter, NoopReporter, Operation,
    EVICTIONS_TOTAL, EXPIRATION_BUCKETS, EXPIRATION_SECONDS, HITS_TOTAL, MISSES_TOTAL,
    TOTAL_ITEMS,
};
pub use shared::SharedCache;
pub use snapshot::{Snapshot, SnapshotItem};
pub use stats::{CacheStats, StatsReporter};
pub use store::LruCache;
pub use traits::{Cache, Inspect, SetStatus};
