//! Local library metadata handed in by the host

use applemusic_client::ProviderIds;
use serde::{Deserialize, Serialize};

/// Track-level fields the album lookup falls back on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInfo {
    pub album: Option<String>,
    #[serde(default)]
    pub album_artists: Vec<String>,
}

/// What the host knows about a local album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub name: String,
    #[serde(default)]
    pub album_artists: Vec<String>,
    /// Expected release year; filters search-result listings
    pub year: Option<i32>,
    #[serde(default)]
    pub provider_ids: ProviderIds,
    /// Tracks of the album, in library order
    #[serde(default)]
    pub song_infos: Vec<SongInfo>,
}

impl AlbumInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_album_artist(mut self, artist: impl Into<String>) -> Self {
        self.album_artists.push(artist.into());
        self
    }

    pub fn with_song(mut self, album: Option<&str>, album_artist: Option<&str>) -> Self {
        self.song_infos.push(SongInfo {
            album: album.map(str::to_string),
            album_artists: album_artist.map(str::to_string).into_iter().collect(),
        });
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_provider_ids(mut self, provider_ids: ProviderIds) -> Self {
        self.provider_ids = provider_ids;
        self
    }

    pub fn first_song(&self) -> Option<&SongInfo> {
        self.song_infos.first()
    }
}

/// What the host knows about a local artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub name: String,
    #[serde(default)]
    pub provider_ids: ProviderIds,
}

impl ArtistInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_provider_ids(mut self, provider_ids: ProviderIds) -> Self {
        self.provider_ids = provider_ids;
        self
    }
}
