//! Cache Store Module
//!
//! The LRU engine: a key index over a recency list, with lazy TTL expiration.
//! Every operation is O(1) amortized.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::lru::{NodeHandle, RecencyList};
use crate::cache::{
    Cache, CacheEntry, Clock, EvictionReason, Inspect, MetricsReporter, NoopReporter, Operation,
    SetStatus, SystemClock,
};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Bounded cache evicting the least recently used entry.
///
/// Not thread-safe on its own; wrap it in a
/// [`SharedCache`](crate::cache::SharedCache) to share it between threads.
pub struct LruCache<K, V> {
    /// Maximum number of entries, fixed at construction
    capacity: usize,
    /// Key to node lookup
    index: HashMap<K, NodeHandle>,
    /// Entries by recency, front = most recently used
    order: RecencyList<CacheEntry<K, V>>,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn MetricsReporter>,
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.order.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Uses the system clock and discards metrics until configured otherwise.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        Ok(Self {
            capacity,
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            clock: Arc::new(SystemClock),
            reporter: Arc::new(NoopReporter),
        })
    }

    /// Replaces the time source used for expiration checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the metrics reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn MetricsReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    // == Peek ==
    /// Returns the stored value without updating recency or checking expiration.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&handle| &self.order[handle].value)
    }

    // == Iteration ==
    /// Entries from most to least recently used, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<K, V>> + '_ {
        self.order.iter()
    }

    // == Set (internal) ==
    /// Inserts or updates `key` with an absolute expiration.
    fn set_entry(&mut self, key: K, value: V, expires_at: Option<DateTime<Utc>>) -> SetStatus {
        if let Some(&handle) = self.index.get(&key) {
            self.update(handle, value, expires_at);
            return SetStatus::Updated;
        }

        self.enforce_capacity();

        let handle = self
            .order
            .push_front(CacheEntry::new(key.clone(), value, expires_at));
        self.index.insert(key, handle);

        self.reporter.record_miss(Operation::Set);
        self.reporter.record_items(Operation::Set, self.order.len());
        SetStatus::Added
    }

    // == Update ==
    /// Replaces value and expiration in place and marks the entry as most recently used.
    fn update(&mut self, handle: NodeHandle, value: V, expires_at: Option<DateTime<Utc>>) {
        let entry = &mut self.order[handle];
        entry.value = value;
        entry.expires_at = expires_at;
        self.order.move_to_front(handle);

        self.reporter.record_hit(Operation::Set);
    }

    // == Enforce Capacity ==
    /// Evicts the least recently used entry if one more insertion would exceed capacity.
    fn enforce_capacity(&mut self) {
        if self.order.len() < self.capacity {
            return;
        }
        if let Some(oldest) = self.order.back() {
            let key = self.order[oldest].key.clone();
            self.remove_entry(&key, EvictionReason::Evicted);
        }
    }

    // == Remove (internal) ==
    /// Detaches and unindexes `key`, reporting why. Returns false if absent.
    fn remove_entry(&mut self, key: &K, reason: EvictionReason) -> bool {
        let Some(handle) = self.index.remove(key) else {
            return false;
        };
        self.order.remove(handle);

        debug!(
            reason = reason.as_str(),
            len = self.order.len(),
            "removed cache entry"
        );
        self.reporter.record_removal(Operation::Remove, reason);
        self.reporter.record_items(Operation::Remove, self.order.len());
        true
    }

    /// Panics unless the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index and order sizes differ");
        assert_eq!(self.order.iter().count(), self.order.len());
        for (key, &handle) in &self.index {
            assert!(self.order[handle].key == *key, "index handle points at another key");
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Cache for LruCache<K, V> {
    type Key = K;
    type Value = V;

    // == Get ==
    fn get(&mut self, key: &K) -> Option<V> {
        let Some(&handle) = self.index.get(key) else {
            self.reporter.record_miss(Operation::Get);
            return None;
        };

        if self.order[handle].is_expired_at(self.clock.now()) {
            self.remove_entry(key, EvictionReason::Expired);
            self.reporter.record_miss(Operation::Get);
            return None;
        }

        self.order.move_to_front(handle);
        self.reporter.record_hit(Operation::Get);
        Some(self.order[handle].value.clone())
    }

    // == Set ==
    fn set(&mut self, key: K, value: V) -> SetStatus {
        self.set_entry(key, value, None)
    }

    // == Set With TTL ==
    fn set_with_ttl(&mut self, key: K, value: V, ttl: Duration) -> SetStatus {
        let now = self.clock.now();
        // An overflowing instant is either unreachable (never expires) or long past.
        let expires_at = now.checked_add_signed(ttl);
        let already_expired = match expires_at {
            Some(expires) => expires <= now,
            None => ttl < Duration::zero(),
        };

        let status = if already_expired {
            self.remove_entry(&key, EvictionReason::Expired);
            SetStatus::Expired
        } else {
            self.set_entry(key, value, expires_at)
        };

        self.reporter.observe_ttl(ttl_seconds(ttl));
        status
    }

    // == Remove ==
    fn remove(&mut self, key: &K) {
        self.remove_entry(key, EvictionReason::Manual);
    }

    // == Length ==
    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn as_inspect(&self) -> Option<&dyn Inspect<Key = K, Value = V>> {
        Some(self)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Inspect for LruCache<K, V> {
    type Key = K;
    type Value = V;

    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = &CacheEntry<K, V>> + '_> {
        Box::new(self.order.iter())
    }
}

/// `ttl` in fractional seconds, at nanosecond precision when it fits.
fn ttl_seconds(ttl: Duration) -> f64 {
    ttl.num_nanoseconds().map_or_else(
        || ttl.num_milliseconds() as f64 / 1e3,
        |nanos| nanos as f64 / 1e9,
    )
}
