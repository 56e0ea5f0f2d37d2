//! Rust client for the GNews article search API
//!
//! This crate provides typed bindings to the GNews `search` endpoint, which
//! returns recent news articles matching a free-text query.
//!
//! # Example
//!
//! ```no_run
//! use gnews_api::{GnewsClient, SearchParams};
//!
//! # async fn example() -> Result<(), gnews_api::GnewsError> {
//! let client = GnewsClient::new();
//! let params = SearchParams::new("Ahmedabad Real Estate")
//!     .lang("en")
//!     .country("in")
//!     .max(10);
//!
//! let response = client.search("my-api-key", &params).await?;
//! for article in response.articles.unwrap_or_default() {
//!     println!("{:?}", article.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /search` - Search articles by keyword, language and country

mod client;
mod error;
mod types;

pub use client::GnewsClient;
pub use error::{GnewsError, Result};
pub use types::{Article, ArticleSource, SearchParams, SearchResponse};
