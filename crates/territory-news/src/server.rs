//! HTTP server for news endpoints
//!
//! Provides /health, /news, /news/cached and /news/refresh. None of the news
//! routes report fetch failures; the worst a caller sees is an empty list.

use crate::cache::{NewsCache, RefreshOutcome};
use crate::types::{HealthResponse, NewsSnapshot};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: NewsCache,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(cache: NewsCache) -> Self {
        Self {
            cache,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/news", get(get_news))
        .route("/news/cached", get(get_cached_news))
        .route("/news/refresh", post(refresh_news))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: state.cache.stats(),
    })
}

/// News for the dashboards, refreshed when empty or stale
async fn get_news(State(state): State<SharedState>) -> Json<NewsSnapshot> {
    Json(state.cache.get_news().await)
}

/// Whatever is cached right now
async fn get_cached_news(State(state): State<SharedState>) -> Json<NewsSnapshot> {
    Json(state.cache.cached())
}

/// Force a refresh regardless of age
async fn refresh_news(State(state): State<SharedState>) -> Json<NewsSnapshot> {
    if let RefreshOutcome::Failed(reason) = state.cache.refresh().await {
        warn!(error = %reason, "Manual news refresh failed");
    }
    Json(state.cache.cached())
}
