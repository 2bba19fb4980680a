use applemusic_client::{AppleMusicService, Album, Artist, ItemType, RemoteItem, RemoteMusicItem};
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::{candidate_urls, recover_absence, skip_failed_candidate, ArtistResolver, ResolverOptions};
use crate::error::{ProviderError, ProviderResult};
use crate::info::AlbumInfo;
use crate::result::{remote_images, MetadataResult, MusicAlbum, RemoteSearchResult};
use crate::term::album_lookup;

/// Resolves local albums against Apple Music album pages
///
/// Each album's artist links are followed one level deep so the result
/// carries fully scraped artists rather than name-only stubs.
#[derive(Clone)]
pub struct AlbumResolver {
    service: AppleMusicService,
    artists: ArtistResolver,
    options: ResolverOptions,
}

impl AlbumResolver {
    pub fn new(service: AppleMusicService, options: ResolverOptions) -> Self {
        let artists = ArtistResolver::new(service.clone(), options);
        Self {
            service,
            artists,
            options,
        }
    }

    /// Metadata for the first candidate page
    #[instrument(skip(self, info, cancel), fields(album = %info.name))]
    pub async fn get_metadata(
        &self,
        info: &AlbumInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<MetadataResult<MusicAlbum>> {
        let result = self.first_match(info, cancel).await.map(|album| {
            let images = remote_images(album.image_url());
            MetadataResult::found(MusicAlbum::from(&album), images)
        });
        recover_absence(result, MetadataResult::empty)
    }

    /// Every candidate that yields an album released in the expected year
    #[instrument(skip(self, info, cancel), fields(album = %info.name, year = ?info.year))]
    pub async fn get_search_results(
        &self,
        info: &AlbumInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<RemoteSearchResult>> {
        let result = self.all_matches(info, cancel).await;
        recover_absence(result, Vec::new)
    }

    /// Raw artwork bytes
    pub async fn get_image_response(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Bytes> {
        Ok(self.service.image_bytes(url, cancel).await?)
    }

    /// Scrape one album page and enrich its artists
    ///
    /// `Ok(None)` when the page holds no album or the album has no metadata.
    /// Artists whose pages fail or carry no metadata are dropped.
    pub async fn resolve_album(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Option<Album>> {
        let album = self
            .service
            .scrape(url, ItemType::Album, cancel)
            .await?
            .and_then(RemoteItem::into_album);

        let mut album = match album {
            Some(album) if album.has_metadata() => album,
            Some(_) => {
                debug!(url = %url, "Album page has no metadata");
                return Ok(None);
            }
            None => {
                debug!(url = %url, "No album found on page");
                return Ok(None);
            }
        };

        let stubs = std::mem::take(&mut album.artists);
        album.artists = self.resolve_artists(stubs, cancel).await?;
        Ok(Some(album))
    }

    /// Resolve artist stubs concurrently, keeping page order
    async fn resolve_artists(
        &self,
        stubs: Vec<Artist>,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Artist>> {
        let resolved: Vec<_> = stream::iter(stubs)
            .map(|stub| async move {
                let result = self.artists.resolve_artist(&stub.url, cancel).await;
                (stub, result)
            })
            .buffered(self.options.concurrency())
            .collect()
            .await;

        let mut artists = Vec::with_capacity(resolved.len());
        for (stub, result) in resolved {
            match skip_failed_candidate(&stub.url, result)? {
                Some(artist) => artists.push(artist),
                None => debug!(artist = %stub.name, url = %stub.url, "Dropping unresolved artist"),
            }
        }
        Ok(artists)
    }

    async fn all_matches(
        &self,
        info: &AlbumInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<RemoteSearchResult>> {
        let target = album_lookup(info, self.service.config())?;
        let urls = candidate_urls(&self.service, target, ItemType::Album, cancel).await?;

        let resolved: Vec<_> = stream::iter(urls.into_iter().take(self.options.search_result_limit))
            .map(|url| async move {
                let result = self.resolve_album(&url, cancel).await;
                (url, result)
            })
            .buffered(self.options.concurrency())
            .collect()
            .await;

        let mut results = Vec::with_capacity(resolved.len());
        for (url, result) in resolved {
            let Some(album) = skip_failed_candidate(&url, result)? else {
                continue;
            };
            if !matches_year(&album, info.year) {
                debug!(
                    url = %url,
                    expected = ?info.year,
                    actual = ?album.production_year(),
                    "Skipping album released in another year"
                );
                continue;
            }
            results.push(RemoteSearchResult::from(&album));
        }
        Ok(results)
    }

    async fn first_match(&self, info: &AlbumInfo, cancel: &CancellationToken) -> ProviderResult<Album> {
        let target = album_lookup(info, self.service.config())?;
        let urls = candidate_urls(&self.service, target, ItemType::Album, cancel).await?;
        let url = urls
            .first()
            .ok_or_else(|| ProviderError::not_found("no album candidates"))?;

        debug!(url = %url, "Using URL to fetch album data");
        self.resolve_album(url, cancel)
            .await?
            .ok_or_else(|| ProviderError::not_found(format!("no album metadata on {}", url)))
    }
}

/// Whether an album fits the caller's expected release year
///
/// Unknown years on either side never exclude a candidate.
pub fn matches_year(album: &Album, expected: Option<i32>) -> bool {
    match (expected, album.production_year()) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn released(year: i32) -> Album {
        Album {
            name: "Album".to_string(),
            release_date: NaiveDate::from_ymd_opt(year, 6, 1),
            ..Album::default()
        }
    }

    #[test]
    fn test_matches_year() {
        assert!(!matches_year(&released(1995), Some(2000)));
        assert!(matches_year(&released(1995), Some(1995)));
        assert!(matches_year(&released(1995), None));
        assert!(matches_year(&Album::default(), Some(2000)));
    }
}
