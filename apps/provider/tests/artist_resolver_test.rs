//! Integration tests for artist resolution

mod common;

use applemusic_client::{ProviderIds, ProviderKey};
use applemusic_provider::{ArtistInfo, ProviderError};
use assert_matches::assert_matches;
use tokio_util::sync::CancellationToken;

use common::*;

fn portishead_fetcher() -> StubFetcher {
    StubFetcher::new()
        .page(
            &web_search_url("Portishead"),
            SearchPageFixture::new()
                .with_artist("Portishead", "/us/artist/portishead/4579")
                .with_artist("Portishead Tribute", "/us/artist/tribute/88")
                .to_html(),
        )
        .page(
            &artist_url("portishead/4579"),
            ArtistPageFixture::new("Portishead").to_html(),
        )
        .page(&artist_url("tribute/88"), ArtistPageFixture::blank().to_html())
}

#[tokio::test]
async fn test_metadata_from_search() {
    let provider = stub_provider(portishead_fetcher().into_arc());

    let result = provider
        .artists()
        .get_metadata(&ArtistInfo::new("Portishead"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.has_metadata);
    let artist = result.item.unwrap();
    assert_eq!(artist.name, "Portishead");
    assert_eq!(artist.overview.as_deref(), Some("Biography of Portishead"));
    assert_eq!(artist.provider_ids.get(ProviderKey::Artist), Some("4579"));

    // The placeholder image is skipped in favour of the portrait
    assert_eq!(result.remote_images.len(), 2);
    assert!(result.remote_images[0].0.contains("/Features/"));
    assert!(result.remote_images[0].0.ends_with("/1400x1400cc.jpg"));
}

#[tokio::test]
async fn test_stored_id_skips_search() {
    let fetcher = StubFetcher::new()
        .page(&artist_url("4579"), ArtistPageFixture::new("Portishead").to_html())
        .into_arc();
    let provider = stub_provider(fetcher.clone());
    let info = ArtistInfo::new("Portishead")
        .with_provider_ids(ProviderIds::new().with(ProviderKey::Artist, "4579"));

    let result = provider
        .artists()
        .get_metadata(&info, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.has_metadata);
    assert_eq!(fetcher.requested(), vec![artist_url("4579")]);
}

#[tokio::test]
async fn test_blank_first_candidate_is_empty_result() {
    let fetcher = StubFetcher::new()
        .page(
            &web_search_url("Nobody"),
            SearchPageFixture::new()
                .with_artist("Nobody", "/us/artist/nobody/1")
                .to_html(),
        )
        .page(&artist_url("nobody/1"), ArtistPageFixture::blank().to_html())
        .into_arc();
    let provider = stub_provider(fetcher);

    let result = provider
        .artists()
        .get_metadata(&ArtistInfo::new("Nobody"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!result.has_metadata);
    assert!(result.item.is_none());
}

#[tokio::test]
async fn test_empty_name_means_no_search() {
    let fetcher = StubFetcher::new().into_arc();
    let provider = stub_provider(fetcher.clone());

    let result = provider
        .artists()
        .get_metadata(&ArtistInfo::new("  "), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!result.has_metadata);
    assert!(fetcher.requested().is_empty());
}

#[tokio::test]
async fn test_search_results_skip_blank_pages() {
    let provider = stub_provider(portishead_fetcher().into_arc());

    let results = provider
        .artists()
        .get_search_results(&ArtistInfo::new("Portishead"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Portishead");
    assert_eq!(results[0].provider_ids.get(ProviderKey::Artist), Some("4579"));
}

#[tokio::test]
async fn test_search_results_cancelled() {
    let provider = stub_provider(portishead_fetcher().into_arc());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = provider
        .artists()
        .get_search_results(&ArtistInfo::new("Portishead"), &cancel)
        .await;

    assert_matches!(result, Err(ProviderError::Cancelled));
}
