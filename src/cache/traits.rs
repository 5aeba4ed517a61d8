//! Cache Capability Traits
//!
//! [`Cache`] is the operation set every cache implementation supports, and
//! the boundary the concurrency wrapper delegates across. [`Inspect`] is the
//! narrower, optional capability for reading internals without side effects.

use chrono::Duration;
use serde::Serialize;

use crate::cache::CacheEntry;

// == Set Status ==
/// Outcome of a `set` or `set_with_ttl` call.
///
/// A capacity eviction triggered by an insertion is a side effect, not a
/// status: the triggering call still reports [`SetStatus::Added`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStatus {
    /// A new entry was inserted
    Added,
    /// An existing entry had its value and expiration replaced
    Updated,
    /// The TTL was already elapsed; nothing was stored and any previous
    /// entry for the key was removed
    Expired,
}

impl SetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetStatus::Added => "added",
            SetStatus::Updated => "updated",
            SetStatus::Expired => "expired",
        }
    }
}

// == Cache ==
/// Operations a bounded key/value cache supports.
pub trait Cache {
    type Key;
    type Value;

    /// Returns the value for `key`, or `None` if it is absent or expired.
    /// Expired entries are purged as a side effect.
    fn get(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// Inserts or replaces an entry that never expires.
    fn set(&mut self, key: Self::Key, value: Self::Value) -> SetStatus;

    /// Inserts or replaces an entry that expires `ttl` from now.
    ///
    /// A TTL that is zero or negative stores nothing, removes any existing
    /// entry for `key` and returns [`SetStatus::Expired`].
    fn set_with_ttl(&mut self, key: Self::Key, value: Self::Value, ttl: Duration) -> SetStatus;

    /// Removes the entry for `key`. Absent keys are ignored.
    fn remove(&mut self, key: &Self::Key);

    /// Number of stored entries, including expired ones not yet purged.
    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Side-effect-free view of the internals, for implementations that
    /// support one.
    fn as_inspect(&self) -> Option<&dyn Inspect<Key = Self::Key, Value = Self::Value>> {
        None
    }
}

// == Inspect ==
/// Read access to a cache without touching recency order or expiration.
pub trait Inspect {
    type Key;
    type Value;

    /// Returns the stored value even if it has expired, without marking it
    /// as recently used.
    fn peek(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Entries from most to least recently used.
    fn entries(&self) -> Box<dyn Iterator<Item = &CacheEntry<Self::Key, Self::Value>> + '_>;
}
