//! Cache Statistics Module
//!
//! In-process counters for hits, misses, removals and the current entry count.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

use crate::cache::reporter::{EvictionReason, MetricsReporter, Operation};

// == Cache Stats ==
/// Point-in-time copy of the counters kept by a [`StatsReporter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries pushed out by capacity
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Entries removed by an explicit `remove`
    pub removals: u64,
    /// Number of entries after the last insertion or removal
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Reporter ==
/// Reporter that keeps lookup counters in memory.
///
/// Only `get` outcomes count as hits or misses; `set` outcomes are
/// insert/update bookkeeping and are left to richer reporters.
#[derive(Debug, Default)]
pub struct StatsReporter {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    removals: AtomicU64,
    total_entries: AtomicUsize,
}

impl StatsReporter {
    pub fn new() -> Self {
        Self::default()
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            total_entries: self.total_entries.load(Ordering::Relaxed),
        }
    }
}

impl MetricsReporter for StatsReporter {
    fn record_hit(&self, op: Operation) {
        if op == Operation::Get {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_miss(&self, op: Operation) {
        if op == Operation::Get {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_items(&self, _op: Operation, count: usize) {
        self.total_entries.store(count, Ordering::Relaxed);
    }

    fn record_removal(&self, _op: Operation, reason: EvictionReason) {
        let counter = match reason {
            EvictionReason::Manual => &self.removals,
            EvictionReason::Expired => &self.expirations,
            EvictionReason::Evicted => &self.evictions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn observe_ttl(&self, _ttl_seconds: f64) {}
}
