//! Metrics Reporting Module
//!
//! Side channel every cache operation reports to. A reporter is handed to a
//! cache at construction, so separate caches (and tests) never share counts
//! unless they share a reporter.

use std::sync::Arc;

use serde::Serialize;

// == Metric Names ==
pub const HITS_TOTAL: &str = "lru_cache_hits_total";
pub const MISSES_TOTAL: &str = "lru_cache_misses_total";
pub const TOTAL_ITEMS: &str = "lru_cache_total_items";
pub const EVICTIONS_TOTAL: &str = "lru_cache_evictions_total";
pub const EXPIRATION_SECONDS: &str = "lru_cache_item_expiration_duration_seconds";

/// Histogram buckets for [`EXPIRATION_SECONDS`].
pub const EXPIRATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0];

// == Operation ==
/// Cache operation a measurement is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Get,
    Set,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Remove => "remove",
        }
    }
}

// == Eviction Reason ==
/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionReason {
    /// Explicit `remove` call
    Manual,
    /// TTL elapsed, or a TTL that was already elapsed when set
    Expired,
    /// Least recently used entry pushed out by capacity
    Evicted,
}

impl EvictionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionReason::Manual => "manual",
            EvictionReason::Expired => "expired",
            EvictionReason::Evicted => "evicted",
        }
    }
}

// == Metrics Reporter ==
/// Receives the measurements produced by cache operations.
///
/// Implementations must be cheap; they run while the cache lock is held.
pub trait MetricsReporter: Send + Sync {
    /// A lookup (`get`) found a live entry, or a `set` updated an existing one.
    fn record_hit(&self, op: Operation);

    /// A lookup missed, or a `set` inserted a new entry.
    fn record_miss(&self, op: Operation);

    /// Item count after an insertion or a removal.
    fn record_items(&self, op: Operation, count: usize);

    /// An entry was removed for `reason`.
    fn record_removal(&self, op: Operation, reason: EvictionReason);

    /// TTL requested by a `set_with_ttl` call, whatever its outcome.
    fn observe_ttl(&self, ttl_seconds: f64);
}

// == Noop Reporter ==
/// Discards every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl MetricsReporter for NoopReporter {
    fn record_hit(&self, _op: Operation) {}
    fn record_miss(&self, _op: Operation) {}
    fn record_items(&self, _op: Operation, _count: usize) {}
    fn record_removal(&self, _op: Operation, _reason: EvictionReason) {}
    fn observe_ttl(&self, _ttl_seconds: f64) {}
}

// == Facade Reporter ==
/// Emits measurements through the `metrics` facade, labelled with the cache
/// instance name. Without an installed recorder these calls are no-ops.
#[derive(Debug, Clone)]
pub struct FacadeReporter {
    cache_type: String,
}

impl FacadeReporter {
    pub fn new(cache_type: impl Into<String>) -> Self {
        Self {
            cache_type: cache_type.into(),
        }
    }
}

impl MetricsReporter for FacadeReporter {
    fn record_hit(&self, op: Operation) {
        metrics::counter!(
            HITS_TOTAL,
            "cache_type" => self.cache_type.clone(),
            "operation" => op.as_str()
        )
        .increment(1);
    }

    fn record_miss(&self, op: Operation) {
        metrics::counter!(
            MISSES_TOTAL,
            "cache_type" => self.cache_type.clone(),
            "operation" => op.as_str()
        )
        .increment(1);
    }

    fn record_items(&self, op: Operation, count: usize) {
        metrics::gauge!(
            TOTAL_ITEMS,
            "cache_type" => self.cache_type.clone(),
            "operation" => op.as_str()
        )
        .set(count as f64);
    }

    fn record_removal(&self, op: Operation, reason: EvictionReason) {
        metrics::counter!(
            EVICTIONS_TOTAL,
            "cache_type" => self.cache_type.clone(),
            "operation" => op.as_str(),
            "reason" => reason.as_str()
        )
        .increment(1);
    }

    fn observe_ttl(&self, ttl_seconds: f64) {
        metrics::histogram!(EXPIRATION_SECONDS, "cache_type" => self.cache_type.clone())
            .record(ttl_seconds);
    }
}

// == Composition ==
impl<R: MetricsReporter + ?Sized> MetricsReporter for Arc<R> {
    fn record_hit(&self, op: Operation) {
        (**self).record_hit(op)
    }

    fn record_miss(&self, op: Operation) {
        (**self).record_miss(op)
    }

    fn record_items(&self, op: Operation, count: usize) {
        (**self).record_items(op, count)
    }

    fn record_removal(&self, op: Operation, reason: EvictionReason) {
        (**self).record_removal(op, reason)
    }

    fn observe_ttl(&self, ttl_seconds: f64) {
        (**self).observe_ttl(ttl_seconds)
    }
}

/// Reports every measurement to both reporters.
impl<A: MetricsReporter, B: MetricsReporter> MetricsReporter for (A, B) {
    fn record_hit(&self, op: Operation) {
        self.0.record_hit(op);
        self.1.record_hit(op);
    }

    fn record_miss(&self, op: Operation) {
        self.0.record_miss(op);
        self.1.record_miss(op);
    }

    fn record_items(&self, op: Operation, count: usize) {
        self.0.record_items(op, count);
        self.1.record_items(op, count);
    }

    fn record_removal(&self, op: Operation, reason: EvictionReason) {
        self.0.record_removal(op, reason);
        self.1.record_removal(op, reason);
    }

    fn observe_ttl(&self, ttl_seconds: f64) {
        self.0.observe_ttl(ttl_seconds);
        self.1.observe_ttl(ttl_seconds);
    }
}
