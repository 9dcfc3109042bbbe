//! Cache Store Module
//!
//! Main cache engine: HashMap storage stamped with per-category TTLs, lazy
//! expiry on read, and a sweep pass for the background task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use serde_json::Value;
use tracing::debug;

use crate::cache::{
    CacheCounters, CacheEntry, CacheKey, CacheStats, Category, CategoryPolicyTable, Clock,
    MatchStatus, SystemClock,
};

// == Cache Store ==
/// In-memory store with category TTL policies.
///
/// The store never fetches anything itself. Callers check with `get` and
/// write fresh data back with `set` on a miss.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries keyed by `CacheKey::to_storage_key`
    entries: HashMap<String, CacheEntry>,
    /// Current TTL per category
    policy: CategoryPolicyTable,
    /// Read and expiry counters
    counters: CacheCounters,
    clock: Arc<dyn Clock>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with default policies and the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            policy: CategoryPolicyTable::default(),
            counters: CacheCounters::default(),
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key` with the key category's current TTL.
    ///
    /// Overwrites any existing entry and restarts its expiry timer.
    pub fn set(&mut self, key: &CacheKey, value: Value) {
        let ttl = self.policy.ttl(key.category());
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl);
        self.entries.insert(key.to_storage_key(), entry);
        debug!("SET key={} ttl={}s", key, ttl.as_secs());
    }

    // == Get ==
    /// Returns the value if present and fresh.
    ///
    /// An expired entry is removed by the read that finds it.
    pub fn get(&mut self, key: &CacheKey) -> Option<Value> {
        let storage_key = key.to_storage_key();
        let now = self.clock.now_ms();

        match self.entries.get(&storage_key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(&storage_key);
                self.counters.record_lazy_expiration();
                self.counters.record_miss();
                debug!("GET key={} expired", key);
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.counters.record_hit();
                Some(value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Same as `get(key).is_some()`, including the expiry cleanup.
    pub fn has(&mut self, key: &CacheKey) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes `key` if present. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(&key.to_storage_key()).is_some()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Force Refresh ==
    /// Drops every entry of `category`, fresh or not. Returns the count removed.
    pub fn force_refresh(&mut self, category: Category) -> usize {
        let prefix = category.key_prefix();
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        let removed = before - self.entries.len();
        debug!("Force refresh category={} removed={}", category, removed);
        removed
    }

    // == Stats ==
    /// Snapshot of the stored keys and counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.entries.keys().cloned().collect(), self.counters)
    }

    // == Sweep Expired ==
    /// Removes all expired entries in one pass. Returns the number removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();
        self.counters.record_swept(removed);
        removed
    }

    // == Policy ==
    pub fn policy(&self) -> &CategoryPolicyTable {
        &self.policy
    }

    /// TTL a `set` for `category` would stamp right now.
    pub fn ttl_for(&self, category: Category) -> Duration {
        self.policy.ttl(category)
    }

    /// Applies the transfer-window rule for `date`. Returns the new loan roster TTL.
    pub fn update_loan_data_ttl(&mut self, date: &impl Datelike) -> Duration {
        let ttl = self.policy.update_loan_data_ttl(date);
        debug!("Loan roster TTL set to {}s", ttl.as_secs());
        ttl
    }

    /// Applies the transfer-window rule for the clock's current date.
    pub fn update_loan_data_ttl_now(&mut self) -> Duration {
        let today = self.clock.today();
        self.update_loan_data_ttl(&today)
    }

    /// Applies the match-lifecycle rule. Returns the new match data TTL.
    pub fn update_match_data_ttl(&mut self, status: &MatchStatus) -> Duration {
        let ttl = self.policy.update_match_data_ttl(status);
        debug!("Match data TTL set to {}s for status {}", ttl.as_secs(), status);
        ttl
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
