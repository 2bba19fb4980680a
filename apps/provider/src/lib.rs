//! Apple Music metadata provider
//!
//! Host-facing surface of the metadata pipeline: given what a media library
//! knows about a local album or artist, find the matching Apple Music page,
//! scrape it and hand back typed metadata and artwork.
//!
//! # Example
//!
//! ```rust,no_run
//! use applemusic_provider::{AlbumInfo, Config, MetadataProvider};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = MetadataProvider::from_config(&Config::from_env()?)?;
//! let info = AlbumInfo::new("Dummy").with_album_artist("Portishead");
//!
//! let result = provider.albums().get_metadata(&info, &CancellationToken::new()).await?;
//! if let Some(album) = result.item {
//!     println!("{} ({:?})", album.name, album.production_year);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod images;
pub mod info;
pub mod resolver;
pub mod result;
pub mod term;

pub use config::Config;
pub use error::{ErrorSeverity, ProviderError, ProviderResult};
pub use images::{AlbumImageProvider, ArtistImageProvider};
pub use info::{AlbumInfo, ArtistInfo, SongInfo};
pub use resolver::{AlbumResolver, ArtistResolver, ResolverOptions};
pub use result::{
    ImageType, MetadataResult, MusicAlbum, MusicArtist, RemoteImageInfo, RemoteSearchResult,
};
pub use term::{build_album_search_term, build_artist_search_term, LookupTarget};

use std::sync::Arc;

use applemusic_client::{AppleMusicService, DocumentFetcher};

/// Every provider the host registers, sharing one service
#[derive(Clone)]
pub struct MetadataProvider {
    albums: AlbumResolver,
    artists: ArtistResolver,
    album_images: AlbumImageProvider,
    artist_images: ArtistImageProvider,
}

impl MetadataProvider {
    /// Build providers over an explicit service
    pub fn new(service: AppleMusicService, options: ResolverOptions) -> Self {
        Self {
            albums: AlbumResolver::new(service.clone(), options),
            artists: ArtistResolver::new(service.clone(), options),
            album_images: AlbumImageProvider::new(service.clone(), options),
            artist_images: ArtistImageProvider::new(service, options),
        }
    }

    /// Build providers over the HTTP fetcher described by `config`
    pub fn from_config(config: &Config) -> ProviderResult<Self> {
        let service = AppleMusicService::from_config(config.apple_music().clone())?;
        Ok(Self::new(service, ResolverOptions::from_config(config)))
    }

    /// Build providers over a custom fetcher (used by tests)
    pub fn with_fetcher(fetcher: Arc<dyn DocumentFetcher>, config: &Config) -> Self {
        let service = AppleMusicService::new(fetcher, config.apple_music().clone());
        Self::new(service, ResolverOptions::from_config(config))
    }

    pub fn albums(&self) -> &AlbumResolver {
        &self.albums
    }

    pub fn artists(&self) -> &ArtistResolver {
        &self.artists
    }

    pub fn album_images(&self) -> &AlbumImageProvider {
        &self.album_images
    }

    pub fn artist_images(&self) -> &ArtistImageProvider {
        &self.artist_images
    }
}
