//! Host-facing Apple Music operations: search, scrape and image download
//!
//! Every network call is raced against the caller's [`CancellationToken`] so a
//! cancelled resolution stops waiting on in-flight requests immediately.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use applemusic_shared_config::AppleMusicConfig;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::cache::CachingFetcher;
use crate::error::{AppleMusicError, AppleMusicResult};
use crate::extractor;
use crate::fetcher::{DocumentFetcher, DocumentKind, HttpFetcher};
use crate::models::{ItemType, RemoteItem};
use crate::search;

/// Apple Music search and scrape operations over an injected fetcher
#[derive(Clone)]
pub struct AppleMusicService {
    fetcher: Arc<dyn DocumentFetcher>,
    config: AppleMusicConfig,
}

impl AppleMusicService {
    /// Create a service around an explicit fetcher
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, config: AppleMusicConfig) -> Self {
        Self { fetcher, config }
    }

    /// Create a service with the HTTP fetcher described by `config`
    ///
    /// A non-zero `cache_ttl_secs` wraps the fetcher in a [`CachingFetcher`].
    pub fn from_config(config: AppleMusicConfig) -> AppleMusicResult<Self> {
        let http: Arc<dyn DocumentFetcher> = Arc::new(HttpFetcher::new(&config)?);
        let fetcher: Arc<dyn DocumentFetcher> = if config.cache_ttl_secs > 0 {
            Arc::new(CachingFetcher::new(
                http,
                Duration::from_secs(config.cache_ttl_secs),
            ))
        } else {
            http
        };
        Ok(Self::new(fetcher, config))
    }

    pub fn config(&self) -> &AppleMusicConfig {
        &self.config
    }

    /// Ordered candidate page URLs for a search term
    #[instrument(skip(self, cancel))]
    pub async fn search(
        &self,
        term: &str,
        item_type: ItemType,
        cancel: &CancellationToken,
    ) -> AppleMusicResult<Vec<String>> {
        let url = search::search_url(&self.config, term, item_type)?;
        debug!(url = %url, backend = %self.config.search_backend, "Using URL for search");

        let kind = search::document_kind(self.config.search_backend);
        let document = cancellable(cancel, self.fetcher.fetch(&url, kind)).await?;
        search::parse_results(&document, item_type)
    }

    /// Fetch a page and extract a record of the requested type
    ///
    /// `Ok(None)` means the page was fetched but held no usable record.
    #[instrument(skip(self, cancel))]
    pub async fn scrape(
        &self,
        url: &str,
        item_type: ItemType,
        cancel: &CancellationToken,
    ) -> AppleMusicResult<Option<RemoteItem>> {
        let document = cancellable(cancel, self.fetcher.fetch(url, DocumentKind::Html)).await?;
        Ok(extractor::extract(&document, item_type))
    }

    /// Raw image bytes
    #[instrument(skip(self, cancel))]
    pub async fn image_bytes(&self, url: &str, cancel: &CancellationToken) -> AppleMusicResult<Bytes> {
        cancellable(cancel, self.fetcher.fetch_bytes(url)).await
    }
}

/// Run `operation` unless `cancel` fires first
pub async fn cancellable<T, F>(cancel: &CancellationToken, operation: F) -> AppleMusicResult<T>
where
    F: Future<Output = AppleMusicResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(AppleMusicError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppleMusicError::Cancelled),
        result = operation => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Document;
    use applemusic_shared_config::SearchBackend;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves one canned body for every URL and remembers what was asked for
    struct CannedFetcher {
        body: String,
        requested: Mutex<Vec<(String, DocumentKind)>>,
    }

    impl CannedFetcher {
        fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_string(),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DocumentFetcher for CannedFetcher {
        async fn fetch(&self, url: &str, kind: DocumentKind) -> AppleMusicResult<Document> {
            self.requested.lock().unwrap().push((url.to_string(), kind));
            Ok(Document::new(url, kind, self.body.clone()))
        }

        async fn fetch_bytes(&self, _url: &str) -> AppleMusicResult<Bytes> {
            Ok(Bytes::from(self.body.clone()))
        }
    }

    /// Never answers
    struct HangingFetcher;

    #[async_trait]
    impl DocumentFetcher for HangingFetcher {
        async fn fetch(&self, _url: &str, _kind: DocumentKind) -> AppleMusicResult<Document> {
            std::future::pending().await
        }

        async fn fetch_bytes(&self, _url: &str) -> AppleMusicResult<Bytes> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_search_itunes_backend_fetches_json() {
        let fetcher = CannedFetcher::new(
            r#"{"resultCount": 1, "results": [{"artistLinkUrl": "https://music.apple.com/us/artist/portishead/4579?uo=4"}]}"#,
        );
        let config = AppleMusicConfig::default().with_search_backend(SearchBackend::Itunes);
        let service = AppleMusicService::new(fetcher.clone(), config);

        let urls = service
            .search("Portishead", ItemType::Artist, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://music.apple.com/us/artist/portishead/4579"]);
        let requested = fetcher.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        assert_eq!(requested[0].1, DocumentKind::Json);
        assert!(requested[0].0.contains("entity=musicArtist"));
    }

    #[tokio::test]
    async fn test_scrape_sets_url_and_id() {
        let fetcher = CannedFetcher::new(
            r#"<html><body><h1 data-testid="artist-header-name">Portishead</h1></body></html>"#,
        );
        let service = AppleMusicService::new(fetcher, AppleMusicConfig::default());

        let item = service
            .scrape(
                "https://music.apple.com/us/artist/portishead/4579",
                ItemType::Artist,
                &CancellationToken::new(),
            )
            .await
            .unwrap()
            .and_then(RemoteItem::into_artist)
            .unwrap();

        assert_eq!(item.url, "https://music.apple.com/us/artist/portishead/4579");
        assert_eq!(item.id.as_deref(), Some("4579"));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let fetcher = CannedFetcher::new("<html></html>");
        let service = AppleMusicService::new(fetcher.clone(), AppleMusicConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service.scrape("https://music.apple.com/us/album/1", ItemType::Album, &cancel).await;
        assert_matches!(result, Err(AppleMusicError::Cancelled));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_fetch() {
        let service = AppleMusicService::new(Arc::new(HangingFetcher), AppleMusicConfig::default());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            service.image_bytes("https://is1-ssl.mzstatic.com/x/1400x1400cc.jpg", &cancel),
        )
        .await
        .expect("cancellation should end the wait");
        assert_matches!(result, Err(AppleMusicError::Cancelled));
    }

    #[test]
    fn test_from_config_with_cache() {
        let config = AppleMusicConfig {
            cache_ttl_secs: 60,
            ..AppleMusicConfig::default()
        };
        let service = AppleMusicService::from_config(config).unwrap();
        assert_eq!(service.config().cache_ttl_secs, 60);
    }
}
