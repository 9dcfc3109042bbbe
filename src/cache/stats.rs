//! Cache Statistics Module
//!
//! Tracks read outcomes and expiry counts, and the snapshot returned by
//! `CacheStore::stats`.

use serde::Serialize;

// == Counters ==
/// Running counters kept by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Expired entries removed by the read that found them
    pub lazy_expirations: u64,
    /// Expired entries removed by sweep passes
    pub swept: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_lazy_expiration(&mut self) {
        self.lazy_expirations += 1;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of stored entries, expired or not
    pub size: usize,
    /// Storage keys, sorted
    pub keys: Vec<String>,
    #[serde(flatten)]
    pub counters: CacheCounters,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(mut keys: Vec<String>, counters: CacheCounters) -> Self {
        keys.sort_unstable();
        Self {
            size: keys.len(),
            keys,
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}
