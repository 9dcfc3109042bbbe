//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::cache::MatchStatus;

/// Request body for POST /cache/policy/loan-window
///
/// # Fields
/// - `date`: Calendar date to evaluate (`YYYY-MM-DD`); today if omitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanWindowRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Request body for POST /cache/policy/match-status
#[derive(Debug, Clone, Deserialize)]
pub struct MatchStatusRequest {
    /// Status name such as `FINISHED`, `SCHEDULED` or `LIVE`
    pub status: String,
}

impl MatchStatusRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.status.trim().is_empty() {
            return Some("Status cannot be empty".to_string());
        }
        None
    }

    pub fn match_status(&self) -> MatchStatus {
        MatchStatus::from(self.status.trim())
    }
}
