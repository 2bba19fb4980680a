//! Mock Apple Music / iTunes server for HTTP-level tests
//!
//! Provides a [`MockAppleMusicServer`] that serves album pages, artist pages,
//! web search results and iTunes Search API payloads from fixtures.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{itunes_search_json, AlbumPageFixture, ArtistPageFixture, ItunesResultFixture, SearchPageFixture};

/// Storefront the mock serves pages under
pub const MOCK_COUNTRY: &str = "us";

/// Mock Apple Music server
///
/// This struct wraps a [`wiremock::MockServer`]. Point both the web base URL
/// and the iTunes Search URL at [`url`](Self::url) (the search API lives at
/// `/search`, the web search page at `/us/search`).
///
/// # Example
///
/// ```rust,ignore
/// use applemusic_test_utils::{MockAppleMusicServer, ArtistPageFixture};
///
/// #[tokio::test]
/// async fn test_artist_page() {
///     let server = MockAppleMusicServer::start().await;
///     server
///         .mock_artist_page("portishead/4579", &ArtistPageFixture::new("Portishead"))
///         .await;
///
///     // Configure the client with AppleMusicConfig::with_base_url(server.url())
/// }
/// ```
pub struct MockAppleMusicServer {
    server: MockServer,
}

impl MockAppleMusicServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Absolute URL of an album page, e.g. `album_url("dummy/1440")`
    pub fn album_url(&self, slug: &str) -> String {
        format!("{}/{}/album/{}", self.url(), MOCK_COUNTRY, slug)
    }

    /// Absolute URL of an artist page
    pub fn artist_url(&self, slug: &str) -> String {
        format!("{}/{}/artist/{}", self.url(), MOCK_COUNTRY, slug)
    }

    /// Serve an album page at `/us/album/{slug}`
    pub async fn mock_album_page(&self, slug: &str, page: &AlbumPageFixture) {
        self.mock_html(&format!("/{}/album/{}", MOCK_COUNTRY, slug), page.to_html())
            .await;
    }

    /// Serve an artist page at `/us/artist/{slug}`
    pub async fn mock_artist_page(&self, slug: &str, page: &ArtistPageFixture) {
        self.mock_html(&format!("/{}/artist/{}", MOCK_COUNTRY, slug), page.to_html())
            .await;
    }

    /// Serve the web search results page for a term
    pub async fn mock_web_search(&self, term: &str, page: &SearchPageFixture) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/search", MOCK_COUNTRY)))
            .and(query_param("term", term))
            .respond_with(html_response(page.to_html()))
            .mount(&self.server)
            .await;
    }

    /// Serve an iTunes Search API response for a term
    pub async fn mock_itunes_search(&self, term: &str, results: &[ItunesResultFixture]) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", term))
            .respond_with(ResponseTemplate::new(200).set_body_json(itunes_search_json(results)))
            .mount(&self.server)
            .await;
    }

    /// Serve an empty iTunes Search API response for every term
    pub async fn mock_itunes_search_empty(&self) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCount": 0,
                "results": []
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request to `request_path` with a bare status code
    pub async fn mock_status(&self, request_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serve image bytes at `request_path`
    pub async fn mock_image(&self, request_path: &str, bytes: &[u8]) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(bytes.to_vec()),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests received whose path ends in `/search`
    pub async fn search_request_count(&self) -> usize {
        self.received_paths()
            .await
            .iter()
            .filter(|p| p.ends_with("/search"))
            .count()
    }

    /// Paths of every request received so far, in order
    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }

    async fn mock_html(&self, request_path: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(html_response(body))
            .mount(&self.server)
            .await;
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}
