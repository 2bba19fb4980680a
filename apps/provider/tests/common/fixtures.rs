//! Canned URLs and pages for provider integration tests
//!
//! URLs use the default storefront so they match what the service builds
//! from stored ids and search terms.

pub use applemusic_test_utils::{
    itunes_search_json, AlbumPageFixture, ArtistPageFixture, ItunesResultFixture,
    MockAppleMusicServer, SearchPageFixture,
};

use applemusic_provider::{AlbumInfo, Config};
use applemusic_shared_config::{AppleMusicConfig, SearchBackend};
use url::form_urlencoded;

pub const STOREFRONT: &str = "https://music.apple.com/us";

pub fn album_url(slug: &str) -> String {
    format!("{}/album/{}", STOREFRONT, slug)
}

pub fn artist_url(slug: &str) -> String {
    format!("{}/artist/{}", STOREFRONT, slug)
}

/// Web search URL the service builds for `term`
pub fn web_search_url(term: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!("{}/search?term={}", STOREFRONT, encoded)
}

/// Local metadata for Portishead's "Dummy"
pub fn dummy_info() -> AlbumInfo {
    AlbumInfo::new("Dummy").with_album_artist("Portishead")
}

/// Album page for "Dummy" linking one artist page
pub fn dummy_page() -> AlbumPageFixture {
    AlbumPageFixture::new("Dummy")
        .with_artist("Portishead", "/us/artist/portishead/4579")
        .with_about("Debut album.")
}

/// Provider configuration pointed at a mock server
pub fn mock_config(server: &MockAppleMusicServer, backend: SearchBackend) -> Config {
    Config::with_apple_music(
        AppleMusicConfig::with_base_url(server.url()).with_search_backend(backend),
    )
}
