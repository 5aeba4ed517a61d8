//! Snapshot Module
//!
//! Point-in-time, display-ready rendering of a cache's recency order.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{Cache, Inspect, SharedCache};

// == Snapshot ==
/// Cache contents ordered from most to least recently used.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub capacity: usize,
    pub items: Vec<SnapshotItem>,
}

/// One entry of a [`Snapshot`] with the keys of its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotItem {
    pub key: String,
    /// Value in its display form
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
    /// Key of the next more recently used entry
    pub prev: Option<String>,
    /// Key of the next less recently used entry
    pub next: Option<String>,
}

impl Snapshot {
    /// Walks `cache` front to back. Expired entries are listed as stored.
    pub fn capture<K, V>(cache: &dyn Inspect<Key = K, Value = V>, capacity: usize) -> Self
    where
        K: Display,
        V: Display,
    {
        let rendered: Vec<(String, String, Option<DateTime<Utc>>)> = cache
            .entries()
            .map(|entry| (entry.key.to_string(), entry.value.to_string(), entry.expires_at))
            .collect();

        let items = rendered
            .iter()
            .enumerate()
            .map(|(i, (key, value, expires_at))| SnapshotItem {
                key: key.clone(),
                value: value.clone(),
                expires_at: *expires_at,
                prev: i.checked_sub(1).map(|p| rendered[p].0.clone()),
                next: rendered.get(i + 1).map(|(next, _, _)| next.clone()),
            })
            .collect();

        Self { capacity, items }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }
}

impl<C: Cache> SharedCache<C>
where
    C::Key: Display,
    C::Value: Display,
{
    // == Snapshot ==
    /// Renders the current contents under the cache lock.
    ///
    /// Nothing is purged or reordered. A wrapped cache that does not support
    /// [`Inspect`] yields an empty snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let cache = self.lock();
        match cache.as_inspect() {
            Some(inspect) => Snapshot::capture(inspect, cache.capacity()),
            None => Snapshot::default(),
        }
    }
}
