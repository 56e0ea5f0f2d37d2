//! Territory News Library
//!
//! Cached real-estate news for the territory dashboards: a GNews-backed
//! provider, a TTL cache with single-flight refresh, and the HTTP routes that
//! serve it.

pub mod cache;
pub mod config;
pub mod error;
pub mod provider;
pub mod server;
pub mod types;

#[cfg(test)]
mod testing;

pub use cache::{NewsCache, RefreshOutcome};
pub use config::Config;
pub use error::{FetchErrorKind, NewsError, NewsFetchError, Result};
pub use provider::{GNewsProvider, NewsProvider};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use types::*;
