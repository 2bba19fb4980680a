//! Remote image providers for albums and artists
//!
//! Candidates are found the same way the resolvers find them, but pages are
//! only scraped for their artwork; album artists are not followed.

use applemusic_client::{AppleMusicService, ItemType, PROVIDER_NAME};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::error::{ProviderError, ProviderResult};
use crate::info::{AlbumInfo, ArtistInfo};
use crate::resolver::{candidate_urls, recover_absence, skip_failed_candidate, ResolverOptions};
use crate::result::{ImageType, RemoteImageInfo};
use crate::term::{album_lookup, artist_lookup, LookupTarget};

const SUPPORTED_IMAGES: &[ImageType] = &[ImageType::Primary];

/// Album artwork
#[derive(Clone)]
pub struct AlbumImageProvider {
    service: AppleMusicService,
    options: ResolverOptions,
}

impl AlbumImageProvider {
    pub fn new(service: AppleMusicService, options: ResolverOptions) -> Self {
        Self { service, options }
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn supported_images(&self) -> &'static [ImageType] {
        SUPPORTED_IMAGES
    }

    /// One primary image per candidate page that has artwork
    #[instrument(skip(self, info, cancel), fields(album = %info.name))]
    pub async fn get_images(
        &self,
        info: &AlbumInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<RemoteImageInfo>> {
        let target = album_lookup(info, self.service.config());
        collect_images(&self.service, &self.options, target, ItemType::Album, cancel).await
    }

    pub async fn get_image_response(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Bytes> {
        Ok(self.service.image_bytes(url, cancel).await?)
    }
}

/// Artist artwork
#[derive(Clone)]
pub struct ArtistImageProvider {
    service: AppleMusicService,
    options: ResolverOptions,
}

impl ArtistImageProvider {
    pub fn new(service: AppleMusicService, options: ResolverOptions) -> Self {
        Self { service, options }
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn supported_images(&self) -> &'static [ImageType] {
        SUPPORTED_IMAGES
    }

    #[instrument(skip(self, info, cancel), fields(artist = %info.name))]
    pub async fn get_images(
        &self,
        info: &ArtistInfo,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<RemoteImageInfo>> {
        let target = artist_lookup(info, self.service.config());
        collect_images(&self.service, &self.options, target, ItemType::Artist, cancel).await
    }

    pub async fn get_image_response(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Bytes> {
        Ok(self.service.image_bytes(url, cancel).await?)
    }
}

/// Artwork for every candidate of a lookup
///
/// A stored id is a single-page lookup, so its fetch failure reaches the
/// caller. Search candidates are capped like search results and a failing
/// candidate is skipped.
async fn collect_images(
    service: &AppleMusicService,
    options: &ResolverOptions,
    target: ProviderResult<LookupTarget>,
    item_type: ItemType,
    cancel: &CancellationToken,
) -> ProviderResult<Vec<RemoteImageInfo>> {
    let single_page = matches!(target, Ok(LookupTarget::ProviderUrl(_)));
    let urls = match target {
        Ok(target) => candidate_urls(service, target, item_type, cancel).await,
        Err(e) => Err(e),
    };
    let urls = recover_absence(urls, Vec::new)?;

    let mut images = Vec::new();
    for url in urls.into_iter().take(options.search_result_limit) {
        let scraped = service
            .scrape(&url, item_type, cancel)
            .await
            .map_err(ProviderError::from);
        let scraped = if single_page {
            scraped?
        } else {
            skip_failed_candidate(&url, scraped)?
        };
        let Some(item) = scraped else {
            debug!(url = %url, "No item on page");
            continue;
        };

        match item.as_item().image_url() {
            Some(image_url) => images.push(RemoteImageInfo::primary(image_url)),
            None => debug!(url = %url, "No image on page"),
        }
    }
    Ok(images)
}
