//! Upstream Client
//!
//! Thin reqwest wrapper that appends the secret API token to every request.

use std::time::Duration;

use reqwest::{header::ACCEPT, Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Query parameter carrying the secret token.
pub const API_TOKEN_PARAM: &str = "api_token";

// == Upstream Client ==
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
}

impl UpstreamClient {
    // == Constructor ==
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.upstream_api_token.is_none() {
            warn!("UPSTREAM_API_TOKEN is not set; upstream requests go out unauthenticated");
        }
        Self::new(
            config.upstream_base_url.clone(),
            config.upstream_api_token.clone(),
            config.upstream_timeout(),
        )
    }

    // == Build URL ==
    /// Joins `path` onto the base URL and appends `query` plus the token.
    ///
    /// A caller-supplied `api_token` is dropped so the configured one wins.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid upstream path '{}': {}", path, e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.iter().filter(|(name, _)| name != API_TOKEN_PARAM) {
                pairs.append_pair(name, value);
            }
            if let Some(token) = &self.api_token {
                pairs.append_pair(API_TOKEN_PARAM, token);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    // == Fetch ==
    /// GETs `path` and decodes the JSON body.
    ///
    /// Non-success statuses are returned as `AppError::UpstreamStatus`.
    pub async fn fetch(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.build_url(path, query)?;
        debug!("Forwarding GET /{} upstream", path.trim_start_matches('/'));

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {} for /{}", status, path.trim_start_matches('/'));
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
