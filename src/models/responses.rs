//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::Category;

/// Response body for the policy rule endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PolicyUpdateResponse {
    /// Category whose TTL was retuned
    pub category: Category,
    /// New TTL in seconds
    pub ttl_secs: u64,
}

impl PolicyUpdateResponse {
    pub fn new(category: Category, ttl: Duration) -> Self {
        Self {
            category,
            ttl_secs: ttl.as_secs(),
        }
    }
}

/// Response body for DELETE /cache/categories/:category
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub category: Category,
    /// Number of entries dropped
    pub removed: usize,
}

/// Response body for DELETE /cache/keys/:category/*discriminator
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Storage key that was targeted
    pub key: String,
    /// Whether an entry existed
    pub deleted: bool,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
