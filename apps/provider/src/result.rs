//! Records handed back to the host

use applemusic_client::{
    resize_to, Album, Artist, ImageSize, ProviderIds, ProviderKey, RemoteMusicItem, PROVIDER_NAME,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of artwork an image URL provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    Primary,
    Thumb,
    Backdrop,
}

/// Result of a metadata lookup
///
/// `has_metadata == false` is the normal "nothing found" outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataResult<T> {
    pub item: Option<T>,
    pub has_metadata: bool,
    pub remote_images: Vec<(String, ImageType)>,
}

impl<T> MetadataResult<T> {
    pub fn empty() -> Self {
        Self {
            item: None,
            has_metadata: false,
            remote_images: Vec::new(),
        }
    }

    pub fn found(item: T, remote_images: Vec<(String, ImageType)>) -> Self {
        Self {
            item: Some(item),
            has_metadata: true,
            remote_images,
        }
    }
}

/// Album metadata in the host's shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicAlbum {
    pub name: String,
    pub overview: Option<String>,
    pub production_year: Option<i32>,
    pub premiere_date: Option<NaiveDate>,
    /// Every resolved artist, in page order
    pub artists: Vec<String>,
    pub album_artists: Vec<String>,
    pub provider_ids: ProviderIds,
}

impl MusicAlbum {
    pub fn album_artist(&self) -> Option<&str> {
        self.album_artists.first().map(String::as_str)
    }
}

impl From<&Album> for MusicAlbum {
    fn from(album: &Album) -> Self {
        let mut provider_ids = ProviderIds::new();
        if let Some(id) = album.id() {
            provider_ids.set(ProviderKey::Album, id);
        }
        if let Some(id) = album.album_artist().and_then(|artist| artist.id()) {
            provider_ids.set(ProviderKey::AlbumArtist, id);
        }

        Self {
            name: album.name.clone(),
            overview: album.about.clone(),
            production_year: album.production_year(),
            premiere_date: album.release_date,
            artists: album.artists.iter().map(|a| a.name.clone()).collect(),
            album_artists: album
                .album_artist()
                .map(|a| vec![a.name.clone()])
                .unwrap_or_default(),
            provider_ids,
        }
    }
}

/// Artist metadata in the host's shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicArtist {
    pub name: String,
    pub overview: Option<String>,
    pub provider_ids: ProviderIds,
}

impl From<&Artist> for MusicArtist {
    fn from(artist: &Artist) -> Self {
        let mut provider_ids = ProviderIds::new();
        if let Some(id) = artist.id() {
            provider_ids.set(ProviderKey::Artist, id);
        }
        Self {
            name: artist.name.clone(),
            overview: artist.about.clone(),
            provider_ids,
        }
    }
}

/// One entry of a search-result listing used for manual matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSearchResult {
    pub name: String,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub premiere_date: Option<NaiveDate>,
    pub production_year: Option<i32>,
    pub album_artist: Option<String>,
    pub artists: Vec<String>,
    pub provider_ids: ProviderIds,
    pub search_provider_name: String,
}

impl From<&Album> for RemoteSearchResult {
    fn from(album: &Album) -> Self {
        let music_album = MusicAlbum::from(album);
        Self {
            image_url: album
                .image_url
                .as_deref()
                .map(|url| resize_to(url, ImageSize::DEFAULT)),
            album_artist: music_album.album_artist().map(str::to_string),
            name: music_album.name,
            overview: music_album.overview,
            premiere_date: music_album.premiere_date,
            production_year: music_album.production_year,
            artists: music_album.artists,
            provider_ids: music_album.provider_ids,
            search_provider_name: PROVIDER_NAME.to_string(),
        }
    }
}

impl From<&Artist> for RemoteSearchResult {
    fn from(artist: &Artist) -> Self {
        let music_artist = MusicArtist::from(artist);
        Self {
            name: music_artist.name,
            overview: music_artist.overview,
            image_url: artist.image_url.clone(),
            premiere_date: None,
            production_year: None,
            album_artist: None,
            artists: Vec::new(),
            provider_ids: music_artist.provider_ids,
            search_provider_name: PROVIDER_NAME.to_string(),
        }
    }
}

/// Artwork offered to the host for an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImageInfo {
    pub provider_name: String,
    pub url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    pub image_type: ImageType,
}

impl RemoteImageInfo {
    /// Primary image at the default size with a thumbnail variant
    pub fn primary(image_url: &str) -> Self {
        Self {
            provider_name: PROVIDER_NAME.to_string(),
            url: resize_to(image_url, ImageSize::DEFAULT),
            thumbnail_url: resize_to(image_url, ImageSize::THUMBNAIL),
            width: ImageSize::DEFAULT.width,
            height: ImageSize::DEFAULT.height,
            image_type: ImageType::Primary,
        }
    }
}

/// Primary and thumbnail URLs for a metadata result
pub fn remote_images(image_url: Option<&str>) -> Vec<(String, ImageType)> {
    image_url
        .map(|url| {
            vec![
                (resize_to(url, ImageSize::DEFAULT), ImageType::Primary),
                (resize_to(url, ImageSize::THUMBNAIL), ImageType::Thumb),
            ]
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> Album {
        Album {
            id: Some("1097861387".to_string()),
            name: "OK Computer".to_string(),
            url: "https://music.apple.com/us/album/ok-computer/1097861387".to_string(),
            image_url: Some("https://is1-ssl.mzstatic.com/image/thumb/x/1200x630wp-60.jpg".to_string()),
            about: Some("Third album.".to_string()),
            artists: vec![Artist::stub(
                "Radiohead",
                "https://music.apple.com/us/artist/radiohead/657515",
            )],
            release_date: NaiveDate::from_ymd_opt(1997, 5, 21),
        }
    }

    #[test]
    fn test_music_album_from_album() {
        let music_album = MusicAlbum::from(&album());
        assert_eq!(music_album.name, "OK Computer");
        assert_eq!(music_album.production_year, Some(1997));
        assert_eq!(music_album.artists, vec!["Radiohead"]);
        assert_eq!(music_album.album_artist(), Some("Radiohead"));
        assert_eq!(music_album.provider_ids.get(ProviderKey::Album), Some("1097861387"));
        assert_eq!(music_album.provider_ids.get(ProviderKey::AlbumArtist), Some("657515"));
    }

    #[test]
    fn test_music_album_without_artists_has_no_album_artist_id() {
        let mut album = album();
        album.artists.clear();
        let music_album = MusicAlbum::from(&album);
        assert!(music_album.album_artists.is_empty());
        assert_eq!(music_album.provider_ids.get(ProviderKey::AlbumArtist), None);
    }

    #[test]
    fn test_search_result_from_album() {
        let result = RemoteSearchResult::from(&album());
        assert_eq!(result.search_provider_name, "Apple Music");
        assert_eq!(result.album_artist.as_deref(), Some("Radiohead"));
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://is1-ssl.mzstatic.com/image/thumb/x/1400x1400cc.jpg")
        );
    }

    #[test]
    fn test_remote_image_info_primary() {
        let info = RemoteImageInfo::primary("https://is1-ssl.mzstatic.com/image/thumb/x/1200x1200bf-60.jpg");
        assert_eq!(info.url, "https://is1-ssl.mzstatic.com/image/thumb/x/1400x1400cc.jpg");
        assert_eq!(info.thumbnail_url, "https://is1-ssl.mzstatic.com/image/thumb/x/100x100cc.jpg");
        assert_eq!((info.width, info.height), (1400, 1400));
        assert_eq!(info.image_type, ImageType::Primary);
    }

    #[test]
    fn test_remote_images() {
        assert!(remote_images(None).is_empty());
        let images = remote_images(Some("https://a.mzstatic.com/x/1000x1000bb.jpg"));
        assert_eq!(images[0], ("https://a.mzstatic.com/x/1400x1400cc.jpg".to_string(), ImageType::Primary));
        assert_eq!(images[1].1, ImageType::Thumb);
    }

    #[test]
    fn test_empty_result() {
        let result: MetadataResult<MusicAlbum> = MetadataResult::empty();
        assert!(!result.has_metadata);
        assert!(result.item.is_none());
    }
}
