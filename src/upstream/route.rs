//! Proxy routing rules: which cache category an upstream path belongs to,
//! how its cache key is formed, and what match status a fixture payload
//! carries.

use serde_json::Value;

use crate::cache::{CacheKey, Category, MatchStatus};
use crate::upstream::API_TOKEN_PARAM;

/// Cache category for an upstream path, or None for uncached pass-through.
///
/// Decided by the first path segment.
pub fn category_for_path(path: &str) -> Option<Category> {
    let first = path.trim_start_matches('/').split('/').next()?;
    match first {
        "leagues" | "seasons" | "teams" => Some(Category::LeagueData),
        "players" | "squads" | "transfers" => Some(Category::LoanRosterData),
        "fixtures" | "livescores" => Some(Category::MatchData),
        _ => None,
    }
}

/// Cache key for a proxied request: path plus query sorted by name, so
/// `?a=1&b=2` and `?b=2&a=1` share an entry. Names and values are
/// form-encoded so a value containing `&` or `=` cannot alias other params.
/// The token never enters the key.
pub fn cache_key(category: Category, path: &str, query: &[(String, String)]) -> CacheKey {
    let path = path.trim_matches('/');

    let mut params: Vec<&(String, String)> = query
        .iter()
        .filter(|(name, _)| name != API_TOKEN_PARAM)
        .collect();
    params.sort();

    if params.is_empty() {
        return CacheKey::new(category, path);
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    CacheKey::new(category, format!("{}?{}", path, query))
}

/// Match status carried by a fixture response body, read from `data.state_id`.
///
/// For a list of fixtures the status with the shortest match TTL wins, so a
/// mixed page refreshes as often as its liveliest match needs.
pub fn fixture_status(payload: &Value) -> Option<MatchStatus> {
    let data = payload.get("data")?;
    let state_of = |fixture: &Value| {
        fixture
            .get("state_id")
            .and_then(Value::as_i64)
            .map(MatchStatus::from_state_id)
    };

    match data {
        Value::Array(fixtures) => fixtures
            .iter()
            .filter_map(state_of)
            .min_by_key(|status| status.match_data_ttl()),
        fixture => state_of(fixture),
    }
}
