//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the engine against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::Duration;

use crate::cache::{Cache, LruCache, ManualClock, SetStatus, SharedCache, StatsReporter};

// == Strategies ==
/// Keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    SetWithTtl { key: String, value: String, ttl_ms: i64 },
    Get { key: String },
    Remove { key: String },
    Advance { ms: i64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => (key_strategy(), value_strategy(), -5i64..50)
            .prop_map(|(key, value, ttl_ms)| CacheOp::SetWithTtl { key, value, ttl_ms }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => (0i64..30).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

// == Reference Model ==
/// Vec-backed LRU with the same semantics, front = most recently used.
#[derive(Debug, Default)]
struct Model {
    capacity: usize,
    now_ms: i64,
    entries: VecDeque<(String, String, Option<i64>)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _, _)| k == key)
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        if matches!(entry.2, Some(expires) if expires <= self.now_ms) {
            return None;
        }
        let value = entry.1.clone();
        self.entries.push_front(entry);
        Some(value)
    }

    fn set(&mut self, key: String, value: String, expires: Option<i64>) -> SetStatus {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
            self.entries.push_front((key, value, expires));
            return SetStatus::Updated;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front((key, value, expires));
        SetStatus::Added
    }

    fn set_with_ttl(&mut self, key: String, value: String, ttl_ms: i64) -> SetStatus {
        if ttl_ms <= 0 {
            self.remove(&key);
            return SetStatus::Expired;
        }
        let expires = self.now_ms + ttl_ms;
        self.set(key, value, Some(expires))
    }

    fn remove(&mut self, key: &str) {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _, _)| k.clone()).collect()
    }
}

fn engine_with_clock(capacity: usize) -> (LruCache<String, String>, ManualClock) {
    let clock = ManualClock::default();
    let cache = LruCache::new(capacity)
        .unwrap()
        .with_clock(Arc::new(clock.clone()));
    (cache, clock)
}

fn engine_keys(cache: &LruCache<String, String>) -> Vec<String> {
    cache.iter().map(|entry| entry.key.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any sequence of operations the engine agrees with the model on every
    // returned value and status, and on the full recency order afterwards.
    // The key index stays in step with the recency list throughout.
    #[test]
    fn prop_engine_matches_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, clock) = engine_with_clock(capacity);
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    let got = cache.set(key.clone(), value.clone());
                    let want = model.set(key, value, None);
                    prop_assert_eq!(got, want);
                }
                CacheOp::SetWithTtl { key, value, ttl_ms } => {
                    let got = cache.set_with_ttl(key.clone(), value.clone(), Duration::milliseconds(ttl_ms));
                    let want = model.set_with_ttl(key, value, ttl_ms);
                    prop_assert_eq!(got, want);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(&key));
                }
                CacheOp::Remove { key } => {
                    cache.remove(&key);
                    model.remove(&key);
                }
                CacheOp::Advance { ms } => {
                    clock.advance(Duration::milliseconds(ms));
                    model.now_ms += ms;
                }
            }

            cache.assert_invariants();
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(engine_keys(&cache), model.keys());
        }
    }

    // For any sequence of inserts, the number of entries never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200),
        capacity in 1usize..20
    ) {
        let mut cache = LruCache::new(capacity).unwrap();

        for (key, value) in entries {
            cache.set(key, value);
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Storing V1 then V2 under one key returns V2, keeps one entry and
    // reports added then updated.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = LruCache::new(4).unwrap();

        prop_assert_eq!(cache.set(key.clone(), value1), SetStatus::Added);
        prop_assert_eq!(cache.set(key.clone(), value2.clone()), SetStatus::Updated);

        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.get(&key), Some(value2));
    }

    // Reading the oldest key before an overflowing insert saves it and
    // evicts the second oldest instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::hash_set("[a-z]{3,8}", 3..8),
        new_key in "[0-9]{3}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let mut cache = LruCache::new(capacity).unwrap();
        for key in &keys {
            cache.set(key.clone(), format!("value_{}", key));
        }

        let accessed = keys[0].clone();
        prop_assert!(cache.get(&accessed).is_some());
        cache.set(new_key.clone(), "new".to_string());

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(cache.get(&accessed).is_some(), "Accessed key was evicted");
        prop_assert!(cache.get(&keys[1]).is_none(), "Second oldest key survived");
        prop_assert!(cache.get(&new_key).is_some());
    }

    // Removing twice has the same effect as removing once.
    #[test]
    fn prop_remove_is_idempotent(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..20),
        target in key_strategy()
    ) {
        let mut once = LruCache::new(8).unwrap();
        let mut twice = LruCache::new(8).unwrap();
        for (key, value) in entries {
            once.set(key.clone(), value.clone());
            twice.set(key, value);
        }

        once.remove(&target);
        twice.remove(&target);
        twice.remove(&target);

        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(engine_keys(&once), engine_keys(&twice));
    }

    // Hit and miss counters match the lookup outcomes seen by the caller.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let stats = Arc::new(StatsReporter::new());
        let clock = ManualClock::default();
        let cache = SharedCache::new(
            LruCache::new(4)
                .unwrap()
                .with_clock(Arc::new(clock.clone()))
                .with_reporter(stats.clone()),
        );
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value);
                }
                CacheOp::SetWithTtl { key, value, ttl_ms } => {
                    cache.set_with_ttl(key, value, Duration::milliseconds(ttl_ms));
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { key } => cache.remove(&key),
                CacheOp::Advance { ms } => clock.advance(Duration::milliseconds(ms)),
            }
        }

        let snapshot = stats.snapshot();
        prop_assert_eq!(snapshot.hits, expected_hits);
        prop_assert_eq!(snapshot.misses, expected_misses);
        prop_assert!(snapshot.total_entries <= 4);
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_agrees_on_end_to_end_example() {
        let mut model = Model::new(2);
        let mut cache = LruCache::new(2).unwrap();

        for (key, value) in [("a", "1"), ("b", "2")] {
            assert_eq!(
                cache.set(key.to_string(), value.to_string()),
                model.set(key.to_string(), value.to_string(), None)
            );
        }
        assert_eq!(cache.get(&"a".to_string()), model.get("a"));
        cache.set("c".to_string(), "3".to_string());
        model.set("c".to_string(), "3".to_string(), None);

        assert_eq!(engine_keys(&cache), model.keys());
        assert_eq!(engine_keys(&cache), vec!["c".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_distinct_keys_fill_capacity_exactly() {
        let keys: HashSet<String> = (0..10).map(|i| format!("k{}", i)).collect();
        let mut cache = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.set(key.clone(), "v".to_string());
        }
        assert_eq!(cache.len(), cache.capacity());
    }
}
