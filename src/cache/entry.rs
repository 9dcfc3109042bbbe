//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// TTL copied from the policy table at write time
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: Value, inserted_at: u64, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is still fresh at exactly `inserted_at + ttl`; it expires
    /// only once strictly more than `ttl` has elapsed.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.inserted_at) > self.ttl_ms()
    }

    fn ttl_ms(&self) -> u64 {
        u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_fresh_until_ttl_elapsed() {
        let entry = CacheEntry::new(json!({"id": 1}), 1_000, Duration::from_millis(500));

        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(1_499));
        assert!(!entry.is_expired(1_500), "Entry should be fresh at the boundary");
        assert!(entry.is_expired(1_501));
    }

    #[test]
    fn test_entry_clock_before_insert_is_fresh() {
        let entry = CacheEntry::new(json!(null), 5_000, Duration::from_millis(10));
        assert!(!entry.is_expired(4_000));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let entry = CacheEntry::new(json!(1), u64::MAX - 1, Duration::MAX);
        assert!(!entry.is_expired(u64::MAX));
    }
}
