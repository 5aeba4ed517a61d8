//! Shared Cache Module
//!
//! Thread-safe wrapper serializing every cache operation behind one mutex.
//!
//! A read/write lock would buy nothing here: `get` reorders the recency list
//! and may purge an expired entry, so every operation needs exclusive access.

use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Duration;
use parking_lot::{Mutex, MutexGuard};

use crate::cache::{Cache, LruCache, SetStatus};
use crate::error::Result;

// == Shared Cache ==
/// Wraps any [`Cache`] so it can be shared between threads.
#[derive(Debug)]
pub struct SharedCache<C> {
    inner: Mutex<C>,
    /// Read once at construction; capacity never changes
    capacity: usize,
    /// Length as of the last completed operation, readable without the lock
    len_hint: AtomicUsize,
}

impl<K: Hash + Eq + Clone, V: Clone> SharedCache<LruCache<K, V>> {
    // == Constructor ==
    /// Creates a shared LRU cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::new(LruCache::new(capacity)?))
    }
}

impl<C: Cache> SharedCache<C> {
    /// Wraps an existing cache, keeping whatever it already holds.
    pub fn new(cache: C) -> Self {
        Self {
            capacity: cache.capacity(),
            len_hint: AtomicUsize::new(cache.len()),
            inner: Mutex::new(cache),
        }
    }

    // == Get ==
    pub fn get(&self, key: &C::Key) -> Option<C::Value> {
        let mut cache = self.inner.lock();
        let value = cache.get(key);
        self.store_len(&cache);
        value
    }

    // == Set ==
    pub fn set(&self, key: C::Key, value: C::Value) -> SetStatus {
        let mut cache = self.inner.lock();
        let status = cache.set(key, value);
        self.store_len(&cache);
        status
    }

    // == Set With TTL ==
    pub fn set_with_ttl(&self, key: C::Key, value: C::Value, ttl: Duration) -> SetStatus {
        let mut cache = self.inner.lock();
        let status = cache.set_with_ttl(key, value, ttl);
        self.store_len(&cache);
        status
    }

    // == Remove ==
    pub fn remove(&self, key: &C::Key) {
        let mut cache = self.inner.lock();
        cache.remove(key);
        self.store_len(&cache);
    }

    // == Length ==
    pub fn len(&self) -> usize {
        let cache = self.inner.lock();
        let len = cache.len();
        self.len_hint.store(len, Ordering::Relaxed);
        len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries. Does not take the lock.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Unsynchronized Access ==
    /// Returns the stored value for `key` without taking the lock, without
    /// marking it as recently used and without checking expiration, so an
    /// expired value may be returned. Meant for debugging and inspection only.
    ///
    /// # Panics
    /// Panics if the wrapped cache does not support [`Inspect`](crate::cache::Inspect)
    /// (see [`Cache::as_inspect`]). Wrapping a cache without it and calling
    /// this method is a programming error.
    ///
    /// # Safety
    /// No other thread may be operating on this cache for the duration of the
    /// call. A concurrent `get`, `set` or `remove` is a data race.
    pub unsafe fn peek_unsync(&self, key: &C::Key) -> Option<C::Value>
    where
        C::Value: Clone,
    {
        // SAFETY: the caller guarantees no concurrent access, so no `&mut C`
        // derived from the lock is alive while this shared reference is.
        let cache: &C = unsafe { &*self.inner.data_ptr() };
        let inspect = cache
            .as_inspect()
            .unwrap_or_else(|| panic!("peek_unsync requires a cache that supports inspection"));
        inspect.peek(key).cloned()
    }

    /// Length as of the last completed operation, read without the lock.
    ///
    /// May be stale while other threads are operating on the cache. Fine for
    /// dashboards, not for decisions that need to be correct.
    pub fn len_unsync(&self) -> usize {
        self.len_hint.load(Ordering::Relaxed)
    }

    // == Internals ==
    /// Exclusive access to the wrapped cache.
    pub(crate) fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock()
    }

    fn store_len(&self, cache: &C) {
        self.len_hint.store(cache.len(), Ordering::Relaxed);
    }
}

impl<C: Cache> Cache for SharedCache<C> {
    type Key = C::Key;
    type Value = C::Value;

    fn get(&mut self, key: &C::Key) -> Option<C::Value> {
        SharedCache::get(self, key)
    }

    fn set(&mut self, key: C::Key, value: C::Value) -> SetStatus {
        SharedCache::set(self, key, value)
    }

    fn set_with_ttl(&mut self, key: C::Key, value: C::Value, ttl: Duration) -> SetStatus {
        SharedCache::set_with_ttl(self, key, value, ttl)
    }

    fn remove(&mut self, key: &C::Key) {
        SharedCache::remove(self, key)
    }

    fn len(&self) -> usize {
        SharedCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
