//! GNews API HTTP client

use crate::error::{GnewsError, Result};
use crate::types::*;
use std::time::Duration;
use url::Url;

/// Client for the GNews (gnews.io) article search API
pub struct GnewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GnewsClient {
    /// Base URL for GNews API v4
    pub const BASE_URL: &'static str = "https://gnews.io/api/v4";

    /// Create a new GNews client with default settings (30 second timeout)
    pub fn new() -> Self {
        Self::with_base_url(Self::BASE_URL, Duration::from_secs(30))
    }

    /// Create a new GNews client against a custom base URL and timeout
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full `/search` request URL, API key included
    pub fn search_url(&self, api_key: &str, params: &SearchParams) -> Result<Url> {
        let mut pairs: Vec<(&str, String)> = vec![("q", params.query.clone())];
        if let Some(lang) = &params.lang {
            pairs.push(("lang", lang.clone()));
        }
        if let Some(country) = &params.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(max) = params.max {
            pairs.push(("max", max.to_string()));
        }
        pairs.push(("apikey", api_key.to_string()));

        Ok(Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &pairs,
        )?)
    }

    /// Search articles matching the given parameters
    ///
    /// Non-success statuses are reported as [`GnewsError::Status`] so callers
    /// can tell an expired key from a throttled one.
    pub async fn search(&self, api_key: &str, params: &SearchParams) -> Result<SearchResponse> {
        let url = self.search_url(api_key, params)?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GnewsError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for GnewsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};

    async fn spawn_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = GnewsClient::new();
        let params = SearchParams::new("Ahmedabad Real Estate")
            .lang("en")
            .country("in")
            .max(10);

        let url = client.search_url("secret", &params).unwrap();
        assert_eq!(url.path(), "/api/v4/search");
        assert_eq!(
            url.query(),
            Some("q=Ahmedabad+Real+Estate&lang=en&country=in&max=10&apikey=secret")
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GnewsClient::with_base_url("http://localhost:9999/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[tokio::test]
    async fn test_search_parses_articles() {
        let router = Router::new().route(
            "/search",
            get(|| async {
                Json(serde_json::json!({
                    "totalArticles": 1,
                    "articles": [{ "title": "Metro phase 2 boosts Gandhinagar" }]
                }))
            }),
        );
        let base = spawn_api(router).await;
        let client = GnewsClient::with_base_url(&base, Duration::from_secs(5));

        let response = client
            .search("key", &SearchParams::new("Ahmedabad Real Estate"))
            .await
            .unwrap();
        let articles = response.articles.unwrap();
        assert_eq!(
            articles[0].title.as_deref(),
            Some("Metro phase 2 boosts Gandhinagar")
        );
    }

    #[tokio::test]
    async fn test_search_reports_status() {
        let router = Router::new().route("/search", get(|| async { StatusCode::FORBIDDEN }));
        let base = spawn_api(router).await;
        let client = GnewsClient::with_base_url(&base, Duration::from_secs(5));

        let err = client
            .search("key", &SearchParams::new("anything"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
    }
}
