//! Test doubles shared by the unit tests

use crate::error::{NewsError, NewsFetchError, Result};
use crate::provider::NewsProvider;
use crate::types::{Article, ArticleList};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) fn article(title: &str) -> Article {
    Article {
        title: Some(title.to_string()),
        url: Some(format!("https://news.example.com/{}", title.replace(' ', "-"))),
        ..Article::default()
    }
}

/// Provider that replays queued responses in order, optionally after a delay
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<ArticleList>>>,
    delay: Mutex<Duration>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    pub(crate) fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            delay: Mutex::new(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn push_ok(&self, articles: Vec<Article>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ArticleList { articles }));
    }

    pub(crate) fn push_err(&self, err: NewsFetchError) {
        self.responses.lock().unwrap().push_back(Err(err.into()));
    }

    pub(crate) fn push_config_err(&self) {
        self.responses.lock().unwrap().push_back(Err(NewsError::Configuration(
            "GNEWS_API_KEY is not set".to_string(),
        )));
    }

    pub(crate) fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NewsProvider for ScriptedProvider {
    fn fetch(&self) -> BoxFuture<'_, Result<ArticleList>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(NewsFetchError::transport("no scripted response").into()));
        let delay = *self.delay.lock().unwrap();

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            response
        }
        .boxed()
    }
}
