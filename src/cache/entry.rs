//! Cache Entry Module
//!
//! Defines the record stored for every key, with optional expiration.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single cached record.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiration instant, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    pub fn new(key: K, value: V, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches its
    /// expiration instant (`expires_at <= now`). A TTL of zero therefore
    /// produces an entry that is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        has_expired(self.expires_at, now)
    }
}

// == Utility Functions ==
/// Returns true if `expires_at` is set and not after `now`.
pub fn has_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expires_at, Some(expires) if expires <= now)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_without_expiration_never_expires() {
        let entry = CacheEntry::new("key", "value", None);
        let far_future = Utc::now() + Duration::days(365 * 100);

        assert!(!entry.is_expired_at(far_future));
    }

    #[test]
    fn test_entry_with_expiration() {
        let now = Utc::now();
        let entry = CacheEntry::new("key", "value", Some(now + Duration::seconds(10)));

        assert!(!entry.is_expired_at(now));
        assert!(!entry.is_expired_at(now + Duration::seconds(9)));
        assert!(entry.is_expired_at(now + Duration::seconds(11)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = CacheEntry::new("key", "value", Some(now));

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(!entry.is_expired_at(now - Duration::milliseconds(1)));
    }
}
