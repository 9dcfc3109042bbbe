//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.sportmonks.com/v3/football";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweeper period in seconds
    pub sweep_interval: u64,
    /// Base URL requests under `/api` are forwarded to
    pub upstream_base_url: String,
    /// Token appended as `api_token` to every upstream request
    pub upstream_api_token: Option<String>,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `SWEEP_INTERVAL` - Expiry sweep period in seconds (default: 60)
    /// - `UPSTREAM_BASE_URL` - Sports data API base (default: SportMonks v3 football)
    /// - `UPSTREAM_API_TOKEN` - Secret API token (default: unset)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds, must be positive (default: 10)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            server_port: parse_var::<u16>("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var::<u64>("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_api_token: env::var("UPSTREAM_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            upstream_timeout: parse_var::<u64>("UPSTREAM_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            sweep_interval: 60,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_api_token: None,
            upstream_timeout: 10,
        }
    }
}
