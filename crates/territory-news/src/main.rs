//! Territory News Service - cached real-estate news feed
//!
//! Serves a bounded list of GNews articles to the dashboards, refreshing at
//! most once at a time and reusing results until they go stale.

use std::sync::Arc;
use territory_news::{
    start_server, Config, GNewsProvider, NewsCache, Result, ServerState, SharedState,
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("territory_news=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Territory News Service...");

    // Load configuration from environment
    let config = Config::from_env();
    info!("Port: {}", config.port);
    info!("News API: {}", config.api_base_url);
    info!(
        "Query: {:?} (lang={}, country={}, max={})",
        config.query.query, config.query.lang, config.query.country, config.query.max
    );
    info!("Cache TTL: {} seconds", config.cache_ttl.as_secs());
    if config.api_key.is_none() {
        warn!("GNEWS_API_KEY is not set, news requests will return an empty list");
    }

    let provider = Arc::new(GNewsProvider::new(&config));
    let cache = NewsCache::new(provider, config.cache_ttl, config.refresh_timeout);

    if config.warm_on_start {
        let warm = cache.clone();
        tokio::spawn(async move {
            warm.refresh().await;
        });
    }

    // Create shared state
    let state: SharedState = Arc::new(ServerState::new(cache));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}
