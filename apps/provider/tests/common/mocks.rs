//! In-memory fetcher for provider integration tests
//!
//! Serves canned bodies keyed by exact URL and records every request, so
//! tests can assert both results and which pages were (or were not) fetched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use applemusic_client::{
    AppleMusicError, AppleMusicResult, Document, DocumentFetcher, DocumentKind,
};
use applemusic_provider::{Config, MetadataProvider};
use async_trait::async_trait;
use bytes::Bytes;

/// Fetcher answering from a URL → body map
#[derive(Default)]
pub struct StubFetcher {
    pages: Mutex<HashMap<String, String>>,
    failures: Mutex<HashMap<String, u16>>,
    requested: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch sleeps first, leaving room to cancel mid-flight
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Serve `body` at `url`
    pub fn page(self, url: &str, body: impl Into<String>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
        self
    }

    /// Answer `url` with an HTTP error status
    pub fn failing(self, url: &str, status: u16) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(url.to_string(), status);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    /// Number of requests whose URL contains `fragment`
    pub fn count_containing(&self, fragment: &str) -> usize {
        self.requested()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }

    fn lookup(&self, url: &str) -> AppleMusicResult<String> {
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(status) = self.failures.lock().unwrap().get(url) {
            return Err(AppleMusicError::Status {
                status: *status,
                url: url.to_string(),
            });
        }
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppleMusicError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, url: &str, kind: DocumentKind) -> AppleMusicResult<Document> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let body = self.lookup(url)?;
        Ok(Document::new(url, kind, body))
    }

    async fn fetch_bytes(&self, url: &str) -> AppleMusicResult<Bytes> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Bytes::from(self.lookup(url)?))
    }
}

/// Provider over a stub fetcher with the default storefront
pub fn stub_provider(fetcher: Arc<StubFetcher>) -> MetadataProvider {
    MetadataProvider::with_fetcher(fetcher, &Config::default())
}
