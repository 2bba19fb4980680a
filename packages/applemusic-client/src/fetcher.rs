//! Document fetching over HTTP
//!
//! [`DocumentFetcher`] is the seam between the scraping pipeline and the
//! network. [`HttpFetcher`] is the production implementation; tests swap in
//! in-memory fetchers.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use applemusic_shared_config::{AppleMusicConfig, MAX_RETRIES};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use scraper::Html;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{AppleMusicError, AppleMusicResult};

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Upper bound on a single backoff sleep (milliseconds)
const RETRY_MAX_DELAY_MS: u64 = 10_000;

/// Which backend format a document is expected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Apple Music web page, scraped with selectors
    Html,
    /// iTunes Search API payload
    Json,
}

impl DocumentKind {
    fn accept_header(&self) -> &'static str {
        match self {
            DocumentKind::Html => "text/html,application/xhtml+xml",
            DocumentKind::Json => "application/json",
        }
    }
}

/// A fetched page or payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// URL the document was requested from
    pub url: String,
    pub kind: DocumentKind,
    pub body: String,
}

impl Document {
    pub fn new(url: impl Into<String>, kind: DocumentKind, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            body: body.into(),
        }
    }

    /// Parse the body as an HTML document
    pub fn html(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> AppleMusicResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Retrieves documents and binary resources by URL
///
/// Implementations fail with an [`AppleMusicError`] on network errors,
/// timeouts and non-success statuses.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str, kind: DocumentKind) -> AppleMusicResult<Document>;

    /// Raw bytes, used for artwork downloads
    async fn fetch_bytes(&self, url: &str) -> AppleMusicResult<Bytes>;
}

/// reqwest-backed fetcher with retries for transient failures
#[derive(Clone)]
pub struct HttpFetcher {
    http_client: Client,
    max_retries: u32,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl HttpFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &AppleMusicConfig) -> AppleMusicResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self::with_client(http_client, config.max_retries))
    }

    /// Create a fetcher around an existing HTTP client (for testing)
    pub fn with_client(http_client: Client, max_retries: u32) -> Self {
        Self {
            http_client,
            max_retries: max_retries.min(MAX_RETRIES),
        }
    }

    /// Execute an operation with retry logic for transient failures
    async fn with_retry<T, F, Fut>(&self, operation: F) -> AppleMusicResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AppleMusicResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = retry_delay(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Apple Music request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Send a GET and map transport and status failures
    async fn make_request(&self, url: &str, accept: &str) -> AppleMusicResult<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppleMusicError::Timeout
                } else {
                    AppleMusicError::Http(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(url = %url, "Apple Music rate limited");
            return Err(AppleMusicError::RateLimited);
        }
        if !status.is_success() {
            return Err(AppleMusicError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str, kind: DocumentKind) -> AppleMusicResult<Document> {
        let body = self
            .with_retry(|| async {
                let response = self.make_request(url, kind.accept_header()).await?;
                response.text().await.map_err(AppleMusicError::Http)
            })
            .await?;

        debug!(url = %url, bytes = body.len(), "Fetched document");

        Ok(Document::new(url, kind, body))
    }

    #[instrument(skip(self))]
    async fn fetch_bytes(&self, url: &str) -> AppleMusicResult<Bytes> {
        self.with_retry(|| async {
            let response = self.make_request(url, "image/*,*/*").await?;
            response.bytes().await.map_err(AppleMusicError::Http)
        })
        .await
    }
}

/// Exponential backoff for the given retry attempt, capped
fn retry_delay(attempt: u32) -> Duration {
    let factor = 2u64.checked_pow(attempt).unwrap_or(u64::MAX);
    let delay_ms = RETRY_BASE_DELAY_MS
        .saturating_mul(factor)
        .min(RETRY_MAX_DELAY_MS);
    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(max_retries: u32) -> HttpFetcher {
        let config = AppleMusicConfig {
            max_retries,
            ..AppleMusicConfig::default()
        };
        HttpFetcher::new(&config).unwrap()
    }

    #[test]
    fn test_retry_delay_is_capped() {
        assert_eq!(retry_delay(1), Duration::from_millis(200));
        assert_eq!(retry_delay(3), Duration::from_millis(800));
        assert_eq!(retry_delay(20), Duration::from_millis(RETRY_MAX_DELAY_MS));
        assert_eq!(retry_delay(64), Duration::from_millis(RETRY_MAX_DELAY_MS));
        assert_eq!(retry_delay(u32::MAX), Duration::from_millis(RETRY_MAX_DELAY_MS));
    }

    #[test]
    fn test_max_retries_is_clamped() {
        let fetcher = HttpFetcher::with_client(Client::new(), 64);
        assert_eq!(fetcher.max_retries, MAX_RETRIES);
    }

    #[test]
    fn test_document_json() {
        let doc = Document::new("https://x", DocumentKind::Json, r#"{"resultCount": 0}"#);
        let value: serde_json::Value = doc.json().unwrap();
        assert_eq!(value["resultCount"], 0);

        let bad = Document::new("https://x", DocumentKind::Json, "<html>");
        assert_matches!(bad.json::<serde_json::Value>(), Err(AppleMusicError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_html_sends_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/album/x"))
            .and(header("accept", "text/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let url = format!("{}/us/album/x", server.uri());
        let doc = fetcher(0).fetch(&url, DocumentKind::Html).await.unwrap();
        assert_eq!(doc.url, url);
        assert_eq!(doc.kind, DocumentKind::Html);
        assert_eq!(doc.body, "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/us/album/missing", server.uri());
        let result = fetcher(3).fetch(&url, DocumentKind::Html).await;
        assert_matches!(result, Err(AppleMusicError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let url = format!("{}/us/search", server.uri());
        let result = fetcher(2).fetch(&url, DocumentKind::Html).await;
        assert_matches!(result, Err(AppleMusicError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let url = format!("{}/search", server.uri());
        let result = fetcher(0).fetch(&url, DocumentKind::Json).await;
        assert_matches!(result, Err(AppleMusicError::RateLimited));
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/image/1400x1400cc.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;

        let url = format!("{}/image/1400x1400cc.jpg", server.uri());
        let bytes = fetcher(0).fetch_bytes(&url).await.unwrap();
        assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_fetcher_debug() {
        let debug_str = format!("{:?}", fetcher(2));
        assert!(debug_str.contains("max_retries: 2"));
    }
}
