//! Core types for the news service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use gnews_api::{Article, ArticleSource};

/// Articles returned by one logical fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleList {
    pub articles: Vec<Article>,
}

/// Point-in-time copy of the cache handed to callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSnapshot {
    pub articles: Vec<Article>,
    pub last_updated: Option<DateTime<Utc>>,
    pub total_articles: usize,
}

impl NewsSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Fixed search the service runs against the news API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub query: String,
    pub lang: String,
    pub country: String,
    pub max: u32,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            query: "Ahmedabad Real Estate".to_string(),
            lang: "en".to_string(),
            country: "in".to_string(),
            max: 10,
        }
    }
}

impl NewsQuery {
    pub fn to_search_params(&self) -> gnews_api::SearchParams {
        gnews_api::SearchParams::new(&self.query)
            .lang(&self.lang)
            .country(&self.country)
            .max(self.max)
    }
}

/// Freshness of the cached articles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

/// Statistics about the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub state: CacheState,
    pub refreshing: bool,
    pub total_articles: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub refreshes: u64,
    pub failures: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_serialization() {
        let json = serde_json::to_value(NewsSnapshot::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "articles": [], "lastUpdated": null, "totalArticles": 0 })
        );
    }

    #[test]
    fn test_default_query() {
        let params = NewsQuery::default().to_search_params();
        assert_eq!(params.query, "Ahmedabad Real Estate");
        assert_eq!(params.lang.as_deref(), Some("en"));
        assert_eq!(params.country.as_deref(), Some("in"));
        assert_eq!(params.max, Some(10));
    }

    #[test]
    fn test_health_response_is_snake_case_throughout() {
        let response = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 42,
            cache: CacheStats {
                state: CacheState::Fresh,
                refreshing: false,
                total_articles: 3,
                last_updated: None,
                refreshes: 1,
                failures: 0,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["uptime_secs"], 42);
        assert_eq!(json["cache"]["total_articles"], 3);
        assert!(json["cache"].get("last_updated").is_some());
        assert!(json["cache"].get("totalArticles").is_none());
    }

    #[test]
    fn test_cache_state_serialization() {
        assert_eq!(serde_json::to_string(&CacheState::Stale).unwrap(), "\"stale\"");
    }
}
