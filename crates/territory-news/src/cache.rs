//! In-memory news cache with a staleness window and single-flight refresh
//!
//! The cache holds the last successful fetch and the time it completed.
//! Reads never block on the network. A read that finds the cache empty or
//! older than the TTL triggers a refresh; callers that arrive while a refresh
//! is running attach to it instead of starting their own, so there is only
//! ever one outbound fetch per refresh.
//!
//! The refresh runs as its own task, so it finishes (and clears its in-flight
//! slot) even if every caller waiting on it goes away.

use crate::error::NewsError;
use crate::provider::NewsProvider;
use crate::types::{Article, CacheState, CacheStats, NewsSnapshot};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one refresh, shared by every caller that joined it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { articles: usize },
    Failed(String),
}

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

#[derive(Default)]
struct Contents {
    articles: Vec<Article>,
    last_updated: Option<DateTime<Utc>>,
}

struct Inner {
    provider: Arc<dyn NewsProvider>,
    ttl: Duration,
    refresh_timeout: Duration,
    contents: RwLock<Contents>,
    in_flight: Mutex<Option<InFlight>>,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

/// Process-wide news cache, cheap to clone and share across handlers
#[derive(Clone)]
pub struct NewsCache {
    inner: Arc<Inner>,
}

impl NewsCache {
    pub fn new(provider: Arc<dyn NewsProvider>, ttl: Duration, refresh_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                ttl,
                refresh_timeout,
                contents: RwLock::new(Contents::default()),
                in_flight: Mutex::new(None),
                refreshes: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    /// Current contents without touching the network
    pub fn cached(&self) -> NewsSnapshot {
        let contents = self.inner.read();
        NewsSnapshot {
            articles: contents.articles.clone(),
            last_updated: contents.last_updated,
            total_articles: contents.articles.len(),
        }
    }

    /// Cached news, refreshed first if the cache is empty or stale
    ///
    /// Never fails: a failed refresh leaves either the previous (stale)
    /// articles or an empty snapshot.
    pub async fn get_news(&self) -> NewsSnapshot {
        match self.state() {
            CacheState::Fresh => return self.cached(),
            CacheState::Empty | CacheState::Stale => {}
        }

        let outcome = self.refresh().await;
        let snapshot = self.cached();
        match outcome {
            RefreshOutcome::Failed(reason) => {
                debug!(error = %reason, "Serving news without a successful refresh");
                if snapshot.articles.is_empty() {
                    return NewsSnapshot::empty();
                }
            }
            RefreshOutcome::Updated { articles: 0 } => {
                debug!("News API returned no articles, the next read will fetch again");
            }
            RefreshOutcome::Updated { .. } => {}
        }
        snapshot
    }

    /// Refresh from the provider, or join the refresh already running
    ///
    /// Failures are logged and reported in the outcome; the cache keeps its
    /// previous contents.
    pub async fn refresh(&self) -> RefreshOutcome {
        let flight = {
            let mut slot = self
                .inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(flight) => {
                    debug!("News refresh already in flight, joining it");
                    flight.clone()
                }
                None => {
                    let flight = Self::spawn_refresh(Arc::clone(&self.inner));
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };
        flight.await
    }

    pub fn state(&self) -> CacheState {
        let contents = self.inner.read();
        self.inner.state_of(&contents)
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn stats(&self) -> CacheStats {
        let contents = self.inner.read();
        CacheStats {
            state: self.inner.state_of(&contents),
            refreshing: self.is_refreshing(),
            total_articles: contents.articles.len(),
            last_updated: contents.last_updated,
            refreshes: self.inner.refreshes.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
        }
    }

    fn spawn_refresh(inner: Arc<Inner>) -> InFlight {
        let task = tokio::spawn(async move {
            let outcome = inner.run_refresh().await;
            // Clear the slot before waiters resume so the next stale read can
            // start a new refresh.
            *inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = None;
            outcome
        });

        async move {
            task.await.unwrap_or_else(|e| {
                warn!(error = %e, "News refresh task did not complete");
                RefreshOutcome::Failed(e.to_string())
            })
        }
        .boxed()
        .shared()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, by: Duration) {
        let mut contents = self
            .inner
            .contents
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(updated) = contents.last_updated {
            let by = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
            contents.last_updated = Some(updated - by);
        }
    }
}

impl Inner {
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Contents> {
        self.contents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_of(&self, contents: &Contents) -> CacheState {
        let Some(updated) = contents.last_updated else {
            return CacheState::Empty;
        };
        // An empty result never counts as fresh, so every read refetches until
        // the API returns articles. There is no backoff; a persistent 429 costs
        // two upstream requests (client + raw fallback) per read.
        if contents.articles.is_empty() {
            return CacheState::Empty;
        }
        // A clock that went backwards counts as zero age.
        match (Utc::now() - updated).to_std() {
            Ok(age) if age > self.ttl => CacheState::Stale,
            _ => CacheState::Fresh,
        }
    }

    async fn run_refresh(&self) -> RefreshOutcome {
        let result = match tokio::time::timeout(self.refresh_timeout, self.provider.fetch()).await
        {
            Ok(result) => result,
            Err(_) => Err(NewsError::Timeout(self.refresh_timeout)),
        };

        match result {
            Ok(list) => {
                let count = list.articles.len();
                {
                    let mut contents = self
                        .contents
                        .write()
                        .unwrap_or_else(PoisonError::into_inner);
                    contents.articles = list.articles;
                    contents.last_updated = Some(Utc::now());
                }
                self.refreshes.fetch_add(1, Ordering::Relaxed);
                info!(articles = count, "News cache refreshed");
                RefreshOutcome::Updated { articles: count }
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "News refresh failed, keeping cached articles");
                RefreshOutcome::Failed(e.to_string())
            }
        }
    }
}
