//! API Handlers
//!
//! HTTP request handlers for the caching proxy and the cache admin endpoints.

use axum::{
    extract::{Path, Query, State},
    http::HeaderName,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{self, CacheKey, CacheStats, CacheStore, Category, CategoryPolicyTable, SharedCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, HealthResponse, LoanWindowRequest, MatchStatusRequest,
    PolicyUpdateResponse, RefreshResponse,
};
use crate::upstream::{route, UpstreamClient};

/// Response header telling the caller how a proxied request was served.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Application state shared across all handlers.
///
/// Holds the one cache instance for the process and the upstream client.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(cache: CacheStore, upstream: UpstreamClient) -> Self {
        Self {
            cache: cache::shared(cache),
            upstream,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            CacheStore::new(),
            UpstreamClient::from_config(config)?,
        ))
    }
}

// == Proxy ==

/// Handler for GET /api/*path
///
/// Serves cacheable paths from the cache, loading from upstream on a miss.
/// The lock is released while the upstream request is in flight.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let Some(category) = route::category_for_path(&path) else {
        let body = state.upstream.fetch(&path, &query).await?;
        return Ok(([(X_CACHE, "BYPASS")], Json(body)).into_response());
    };

    let key = route::cache_key(category, &path, &query);

    if let Some(body) = state.cache.write().await.get(&key) {
        debug!("Cache hit for {}", key);
        return Ok(([(X_CACHE, "HIT")], Json(body)).into_response());
    }

    let body = state.upstream.fetch(&path, &query).await?;
    store_fresh(&state.cache, &key, body.clone()).await;

    Ok(([(X_CACHE, "MISS")], Json(body)).into_response())
}

/// Writes a freshly loaded payload back, retuning the adaptive policy first
/// so the new entry picks up the TTL its data calls for.
async fn store_fresh(cache: &SharedCache, key: &CacheKey, body: Value) {
    let mut store = cache.write().await;
    match key.category() {
        Category::MatchData => {
            if let Some(status) = route::fixture_status(&body) {
                store.update_match_data_ttl(&status);
            }
        }
        Category::LoanRosterData => {
            store.update_loan_data_ttl_now();
        }
        _ => {}
    }
    store.set(key, body);
}

// == Cache Admin ==

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.stats())
}

/// Handler for GET /cache/policy
///
/// Returns the TTL each category would stamp on a write right now.
pub async fn policy_handler(State(state): State<AppState>) -> Json<CategoryPolicyTable> {
    Json(state.cache.read().await.policy().clone())
}

/// Handler for POST /cache/policy/loan-window
pub async fn loan_window_handler(
    State(state): State<AppState>,
    Json(req): Json<LoanWindowRequest>,
) -> Json<PolicyUpdateResponse> {
    let mut cache = state.cache.write().await;
    let ttl = match req.date {
        Some(date) => cache.update_loan_data_ttl(&date),
        None => cache.update_loan_data_ttl_now(),
    };
    info!("Loan roster TTL is now {}s", ttl.as_secs());

    Json(PolicyUpdateResponse::new(Category::LoanRosterData, ttl))
}

/// Handler for POST /cache/policy/match-status
pub async fn match_status_handler(
    State(state): State<AppState>,
    Json(req): Json<MatchStatusRequest>,
) -> Result<Json<PolicyUpdateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let status = req.match_status();
    let ttl = state.cache.write().await.update_match_data_ttl(&status);
    info!("Match data TTL is now {}s ({})", ttl.as_secs(), status);

    Ok(Json(PolicyUpdateResponse::new(Category::MatchData, ttl)))
}

/// Handler for DELETE /cache/categories/:category
pub async fn force_refresh_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<RefreshResponse>> {
    let category: Category = category.parse()?;
    let removed = state.cache.write().await.force_refresh(category);
    info!("Force refresh of {}: removed {} entries", category, removed);

    Ok(Json(RefreshResponse { category, removed }))
}

/// Handler for DELETE /cache/keys/:category/*discriminator
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path((category, discriminator)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let key = CacheKey::new(category.parse()?, discriminator);
    let deleted = state.cache.write().await.delete(&key);

    Ok(Json(DeleteResponse {
        key: key.to_storage_key(),
        deleted,
    }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();
    info!("Cache cleared: removed {} entries", removed);

    Json(ClearResponse { removed })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MatchStatus;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::time::Duration;

    /// Upstream nobody listens on; any forwarded request fails.
    fn dead_upstream() -> UpstreamClient {
        UpstreamClient::new("http://127.0.0.1:9", None, Duration::from_millis(200)).unwrap()
    }

    fn test_state() -> AppState {
        AppState::new(CacheStore::new(), dead_upstream())
    }

    #[tokio::test]
    async fn test_proxy_serves_hit_without_upstream() {
        let state = test_state();
        let key = CacheKey::new(Category::LeagueData, "leagues");
        state.cache.write().await.set(&key, json!({"data": [271, 501]}));

        let response = proxy_handler(
            State(state.clone()),
            Path("leagues".to_string()),
            Query(vec![]),
        )
        .await
        .unwrap();

        assert_eq!(response.headers()[X_CACHE], "HIT");
    }

    #[tokio::test]
    async fn test_proxy_miss_propagates_upstream_error() {
        let state = test_state();

        let result = proxy_handler(
            State(state.clone()),
            Path("fixtures".to_string()),
            Query(vec![]),
        )
        .await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
        assert_eq!(state.cache.read().await.len(), 0);
    }

    #[tokio::test]
    async fn test_store_fresh_applies_match_rule() {
        let state = test_state();
        let key = CacheKey::new(Category::MatchData, "fixtures/1");

        store_fresh(&state.cache, &key, json!({"data": {"state_id": 2}})).await;

        let cache = state.cache.read().await;
        assert_eq!(
            cache.ttl_for(Category::MatchData),
            MatchStatus::Live.match_data_ttl()
        );
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_match_status_handler() {
        let state = test_state();
        let req = MatchStatusRequest {
            status: "SCHEDULED".to_string(),
        };

        let response = match_status_handler(State(state.clone()), Json(req))
            .await
            .unwrap();

        assert_eq!(response.ttl_secs, 12 * 3_600);
        assert_eq!(
            state.cache.read().await.ttl_for(Category::MatchData),
            Duration::from_secs(12 * 3_600)
        );
    }

    #[tokio::test]
    async fn test_match_status_handler_rejects_empty() {
        let req = MatchStatusRequest {
            status: String::new(),
        };
        let result = match_status_handler(State(test_state()), Json(req)).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_loan_window_handler_with_date() {
        let state = test_state();
        let req = LoanWindowRequest {
            date: NaiveDate::from_ymd_opt(2025, 1, 31),
        };

        let response = loan_window_handler(State(state), Json(req)).await;
        assert_eq!(response.ttl_secs, 6 * 3_600);
    }

    #[tokio::test]
    async fn test_force_refresh_handler() {
        let state = test_state();
        {
            let mut cache = state.cache.write().await;
            cache.set(&CacheKey::new(Category::LoanRosterData, "players"), json!(1));
            cache.set(&CacheKey::new(Category::LeagueData, "leagues"), json!(2));
        }

        let response = force_refresh_handler(State(state.clone()), Path("loanRosterData".into()))
            .await
            .unwrap();

        assert_eq!(response.removed, 1);
        assert_eq!(state.cache.read().await.stats().keys, vec!["leagueData:leagues"]);
    }

    #[tokio::test]
    async fn test_force_refresh_unknown_category() {
        let result = force_refresh_handler(State(test_state()), Path("loanData".into())).await;
        assert!(matches!(result, Err(AppError::UnknownCategory(_))));
    }

    #[tokio::test]
    async fn test_delete_key_and_clear_handlers() {
        let state = test_state();
        {
            let mut cache = state.cache.write().await;
            cache.set(&CacheKey::new(Category::TeamLogos, "53"), json!("a"));
            cache.set(&CacheKey::new(Category::PlayerPhotos, "9"), json!("b"));
        }

        let response = delete_key_handler(
            State(state.clone()),
            Path(("teamLogos".to_string(), "53".to_string())),
        )
        .await
        .unwrap();
        assert!(response.deleted);
        assert_eq!(response.key, "teamLogos:53");

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.removed, 1);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
