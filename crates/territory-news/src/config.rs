use std::env;
use std::time::Duration;

use crate::types::NewsQuery;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Checked when a fetch runs, not at startup, so the server still boots
    /// (and serves empty news) without a key.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub query: NewsQuery,
    pub cache_ttl: Duration,
    pub refresh_timeout: Duration,
    pub warm_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3005);

        let api_key = lookup("GNEWS_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let api_base_url = lookup("GNEWS_BASE_URL")
            .unwrap_or_else(|| gnews_api::GnewsClient::BASE_URL.to_string());

        let defaults = NewsQuery::default();
        let query = NewsQuery {
            query: lookup("NEWS_QUERY").unwrap_or(defaults.query),
            lang: lookup("NEWS_LANG").unwrap_or(defaults.lang),
            country: lookup("NEWS_COUNTRY").unwrap_or(defaults.country),
            max: lookup("NEWS_MAX")
                .and_then(|m| m.parse().ok())
                .unwrap_or(defaults.max),
        };

        let cache_ttl_secs = lookup("NEWS_CACHE_TTL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(24 * 60 * 60); // 24 hours

        let refresh_timeout_secs = lookup("NEWS_REFRESH_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(30);

        let warm_on_start = lookup("NEWS_WARM_ON_START")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            port,
            api_key,
            api_base_url,
            query,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            refresh_timeout: Duration::from_secs(refresh_timeout_secs),
            warm_on_start,
        }
    }

    /// Per-request timeout for each of the two fetch transports
    ///
    /// A fetch may spend one timeout on the client path and one on the raw
    /// fallback, so both must fit inside `refresh_timeout`.
    pub fn transport_timeout(&self) -> Duration {
        self.refresh_timeout / 2
    }
}
