use applemusic_client::{AppleMusicService, Artist, ItemType, RemoteItem, RemoteMusicItem};
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::{candidate_urls, recover_absence, skip_failed_candidate, ResolverOptions};
use crate::error::{ProviderError, ProviderResult};
use crate::info::ArtistInfo;
use crate::result::{remote_images, MetadataResult, MusicArtist, RemoteSearchResult};
use crate::term::artist_lookup;

/// Resolves local artists against Apple Music artist pages
#[derive(Clone)]
pub struct ArtistResolver {
    service: AppleMusicService,
    options: ResolverOptions,
}

impl ArtistResolver {
    pub fn new(service: AppleMusicService, options: ResolverOptions) -> Self {
        Self { service, options }
    }

    /// Metadata for the first candidate page
    #[instrument(skip(self, info, cancel), fields(artist = %info.name))]
    pub async fn get_metadata(
        &self,
        info: &ArtistInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<MetadataResult<MusicArtist>> {
        let result = self.first_match(info, cancel).await.map(|artist| {
            let images = remote_images(artist.image_url());
            MetadataResult::found(MusicArtist::from(&artist), images)
        });
        recover_absence(result, MetadataResult::empty)
    }

    /// Every candidate that yields an artist, in search order
    #[instrument(skip(self, info, cancel), fields(artist = %info.name))]
    pub async fn get_search_results(
        &self,
        info: &ArtistInfo,
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

    /// Scrape one artist page
    ///
    /// `Ok(None)` when the page holds no artist or the artist has no metadata.
    pub async fn resolve_artist(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Option<Artist>> {
        let artist = self
            .service
            .scrape(url, ItemType::Artist, cancel)
            .await?
            .and_then(RemoteItem::into_artist);

        match artist {
            Some(artist) if artist.has_metadata() => Ok(Some(artist)),
            Some(_) => {
                debug!(url = %url, "Artist page has no metadata");
                Ok(None)
            }
            None => {
                debug!(url = %url, "No artist found on page");
                Ok(None)
            }
        }
    }

    async fn all_matches(
        &self,
        info: &ArtistInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<RemoteSearchResult>> {
        let target = artist_lookup(info, self.service.config())?;
        let urls = candidate_urls(&self.service, target, ItemType::Artist, cancel).await?;

        let resolved: Vec<_> = stream::iter(urls.into_iter().take(self.options.search_result_limit))
            .map(|url| async move {
                let result = self.resolve_artist(&url, cancel).await;
                (url, result)
            })
            .buffered(self.options.concurrency())
            .collect()
            .await;

        let mut results = Vec::with_capacity(resolved.len());
        for (url, result) in resolved {
            if let Some(artist) = skip_failed_candidate(&url, result)? {
                results.push(RemoteSearchResult::from(&artist));
            }
        }
        Ok(results)
    }

    async fn first_match(&self, info: &ArtistInfo, cancel: &CancellationToken) -> ProviderResult<Artist> {
        let target = artist_lookup(info, self.service.config())?;
        let urls = candidate_urls(&self.service, target, ItemType::Artist, cancel).await?;
        let url = urls
            .first()
            .ok_or_else(|| ProviderError::not_found("no artist candidates"))?;

        debug!(url = %url, "Using URL to fetch artist data");
        self.resolve_artist(url, cancel)
            .await?
            .ok_or_else(|| ProviderError::not_found(format!("no artist metadata on {}", url)))
    }
}
