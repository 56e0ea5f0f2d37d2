//! News source abstraction and the GNews-backed implementation
//!
//! A fetch first goes through the typed `gnews-api` client. If that errors or
//! the body has no recognizable `articles` list, the same request is retried
//! once as a hand-built GET whose body is parsed loosely. Only when both paths
//! fail does the caller see a [`NewsFetchError`].

use crate::config::Config;
use crate::error::{NewsError, NewsFetchError, Result};
use crate::types::{Article, ArticleList, NewsQuery};
use futures::future::BoxFuture;
use futures::FutureExt;
use gnews_api::{GnewsClient, SearchParams, SearchResponse};
use serde_json::Value;
use tracing::{debug, warn};

/// Anything that can produce the current list of articles
pub trait NewsProvider: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<ArticleList>>;
}

/// Fetches the configured query from GNews
pub struct GNewsProvider {
    client: GnewsClient,
    http: reqwest::Client,
    api_key: Option<String>,
    query: NewsQuery,
}

impl GNewsProvider {
    pub fn new(config: &Config) -> Self {
        let timeout = config.transport_timeout();
        let client = GnewsClient::with_base_url(&config.api_base_url, timeout);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            http,
            api_key: config.api_key.clone(),
            query: config.query.clone(),
        }
    }

    async fn fetch_articles(&self) -> Result<ArticleList> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| NewsError::Configuration("GNEWS_API_KEY is not set".to_string()))?;

        let params = self.query.to_search_params();

        match self.client.search(api_key, &params).await {
            Ok(SearchResponse {
                articles: Some(articles),
                ..
            }) => return Ok(ArticleList { articles }),
            Ok(_) => warn!("GNews response had no articles list, retrying over raw HTTP"),
            Err(e) => warn!(error = %e, "GNews client request failed, retrying over raw HTTP"),
        }

        Ok(self.fetch_raw(api_key, &params).await?)
    }

    async fn fetch_raw(
        &self,
        api_key: &str,
        params: &SearchParams,
    ) -> std::result::Result<ArticleList, NewsFetchError> {
        let mut url = format!(
            "{}/search?q={}",
            self.client.base_url(),
            urlencoding::encode(&params.query)
        );
        if let Some(lang) = &params.lang {
            url.push_str(&format!("&lang={}", urlencoding::encode(lang)));
        }
        if let Some(country) = &params.country {
            url.push_str(&format!("&country={}", urlencoding::encode(country)));
        }
        if let Some(max) = params.max {
            url.push_str(&format!("&max={}", max));
        }
        url.push_str(&format!("&apikey={}", urlencoding::encode(api_key)));

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsFetchError::from_status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        normalize_articles(body)
    }
}

impl NewsProvider for GNewsProvider {
    fn fetch(&self) -> BoxFuture<'_, Result<ArticleList>> {
        self.fetch_articles().boxed()
    }
}

/// Accept either `{"articles": [...]}` or a bare array of articles
fn normalize_articles(body: Value) -> std::result::Result<ArticleList, NewsFetchError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(NewsFetchError::transport(
                    "News API response did not contain an articles list",
                ))
            }
        },
        _ => {
            return Err(NewsFetchError::transport(
                "News API response did not contain an articles list",
            ))
        }
    };

    let articles = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Article>(item) {
            Ok(article) => Some(article),
            Err(e) => {
                debug!(error = %e, "Skipping malformed article");
                None
            }
        })
        .collect();

    Ok(ArticleList { articles })
}
