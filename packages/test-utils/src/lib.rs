//! Shared test utilities for the Apple Music metadata workspace
//!
//! This crate provides a mock Apple Music / iTunes server and page fixtures
//! for testing without network dependencies. They are used by the client
//! and provider test suites.
//!
//! # Mock Services
//!
//! - [`MockAppleMusicServer`] - wiremock server serving album, artist and search pages
//!
//! # Fixtures
//!
//! - [`AlbumPageFixture`], [`ArtistPageFixture`] - scrapeable detail pages
//! - [`SearchPageFixture`] - web search results page
//! - [`ItunesResultFixture`] - iTunes Search API results
//!
//! # Example
//!
//! ```rust,ignore
//! use applemusic_test_utils::{AlbumPageFixture, MockAppleMusicServer};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let server = MockAppleMusicServer::start().await;
//!     let page = AlbumPageFixture::new("Dummy").with_artist("Portishead", "/us/artist/portishead/4579");
//!     server.mock_album_page("dummy/1440", &page).await;
//!
//!     // Use server.url() as the Apple Music base URL
//! }
//! ```

mod fixtures;
mod server;

pub use fixtures::{
    itunes_search_json,
    AlbumPageFixture,
    ArtistPageFixture,
    ItunesResultFixture,
    SearchPageFixture,
};
pub use server::{MockAppleMusicServer, MOCK_COUNTRY};
