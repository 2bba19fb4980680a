//! In-memory response cache in front of a [`DocumentFetcher`]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use crate::error::AppleMusicResult;
use crate::fetcher::{Document, DocumentFetcher, DocumentKind};

struct CacheEntry {
    document: Document,
    stored_at: Instant,
}

/// Caches successful documents for a fixed TTL
///
/// Failures are never cached. Image bytes pass straight through. Stale
/// entries are dropped when looked up, and the whole map is swept of them at
/// most once per TTL when new documents are stored.
pub struct CachingFetcher {
    inner: Arc<dyn DocumentFetcher>,
    ttl: Duration,
    entries: DashMap<(String, DocumentKind), CacheEntry>,
    last_sweep: Mutex<Instant>,
}

impl CachingFetcher {
    pub fn new(inner: Arc<dyn DocumentFetcher>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Number of entries currently held, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    fn lookup(&self, key: &(String, DocumentKind)) -> Option<Document> {
        if let Some(entry) = self.entries.get(key) {
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.document.clone());
            }
        }
        let ttl = self.ttl;
        self.entries
            .remove_if(key, |_, entry| entry.stored_at.elapsed() >= ttl);
        None
    }

    fn store(&self, key: (String, DocumentKind), document: Document) {
        self.sweep_if_due();
        self.entries.insert(
            key,
            CacheEntry {
                document,
                stored_at: Instant::now(),
            },
        );
    }

    fn sweep_if_due(&self) {
        let Ok(mut last_sweep) = self.last_sweep.lock() else {
            return;
        };
        if last_sweep.elapsed() >= self.ttl {
            *last_sweep = Instant::now();
            drop(last_sweep);
            self.purge_expired();
        }
    }
}

#[async_trait]
impl DocumentFetcher for CachingFetcher {
    async fn fetch(&self, url: &str, kind: DocumentKind) -> AppleMusicResult<Document> {
        let key = (url.to_string(), kind);
        if let Some(document) = self.lookup(&key) {
            debug!(url = %url, "Document cache hit");
            return Ok(document);
        }

        let document = self.inner.fetch(url, kind).await?;
        self.store(key, document.clone());
        Ok(document)
    }

    async fn fetch_bytes(&self, url: &str) -> AppleMusicResult<Bytes> {
        self.inner.fetch_bytes(url).await
    }
}
