//! Cache Module
//!
//! In-memory TTL cache with per-category expiry policies.

mod category;
mod clock;
mod entry;
mod policy;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use category::{CacheKey, Category, UnknownCategory, KEY_SEPARATOR};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use policy::{is_transfer_window, CategoryPolicyTable, MatchStatus};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;

/// The process-wide cache handle. One lock guards entries and policy table
/// together; `get` mutates, so reads take the write lock too.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing between handlers and the sweeper.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
