//! Remote catalog records and iTunes Search response models

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of catalog entity being searched for or scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Album,
    Artist,
}

impl ItemType {
    /// `aria-label` of the matching section on the web search page
    pub fn category_label(&self) -> &'static str {
        match self {
            ItemType::Album => "Albums",
            ItemType::Artist => "Artists",
        }
    }

    /// `entity` parameter of the iTunes Search API
    pub fn search_entity(&self) -> &'static str {
        match self {
            ItemType::Album => "album",
            ItemType::Artist => "musicArtist",
        }
    }

    /// `attribute` parameter of the iTunes Search API
    pub fn search_attribute(&self) -> &'static str {
        match self {
            ItemType::Album => "albumTerm",
            ItemType::Artist => "artistTerm",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Album => write!(f, "album"),
            ItemType::Artist => write!(f, "artist"),
        }
    }
}

/// Fields shared by every scraped catalog entity
pub trait RemoteMusicItem {
    /// Opaque catalog id, usually the last path segment of [`url`](Self::url)
    fn id(&self) -> Option<&str>;
    fn name(&self) -> &str;
    /// Canonical page URL, both identity and re-fetch key
    fn url(&self) -> &str;
    fn image_url(&self) -> Option<&str>;
    fn about(&self) -> Option<&str>;

    /// A record with neither a name nor an about text carries no metadata
    fn has_metadata(&self) -> bool {
        !self.name().is_empty() || self.about().is_some()
    }
}

/// Artist as scraped from its Apple Music page, or a name + url stub
/// taken from an album page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub about: Option<String>,
}

impl Artist {
    /// Stub artist awaiting enrichment from its own page
    pub fn stub(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: crate::provider_key::item_id_from_url(&url),
            name: name.into(),
            url,
            ..Self::default()
        }
    }
}

impl RemoteMusicItem for Artist {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }
}

/// Album as scraped from its Apple Music page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub about: Option<String>,
    /// Ordered; the first entry is the album artist
    pub artists: Vec<Artist>,
    pub release_date: Option<NaiveDate>,
}

impl Album {
    pub fn production_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }

    pub fn album_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }
}

impl RemoteMusicItem for Album {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }
}

/// Either kind of scraped entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RemoteItem {
    Album(Album),
    Artist(Artist),
}

impl RemoteItem {
    pub fn item_type(&self) -> ItemType {
        match self {
            RemoteItem::Album(_) => ItemType::Album,
            RemoteItem::Artist(_) => ItemType::Artist,
        }
    }

    pub fn as_item(&self) -> &dyn RemoteMusicItem {
        match self {
            RemoteItem::Album(album) => album,
            RemoteItem::Artist(artist) => artist,
        }
    }

    pub fn into_album(self) -> Option<Album> {
        match self {
            RemoteItem::Album(album) => Some(album),
            RemoteItem::Artist(_) => None,
        }
    }

    pub fn into_artist(self) -> Option<Artist> {
        match self {
            RemoteItem::Artist(artist) => Some(artist),
            RemoteItem::Album(_) => None,
        }
    }
}

// Internal response types for deserialization

/// iTunes Search API envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result_count: i64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One iTunes Search API hit; albums and artists share the envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)] // Required for serde deserialization, not every field is read
pub(crate) struct SearchResult {
    pub wrapper_type: Option<String>,
    pub artist_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub artist_link_url: Option<String>,
    pub artist_view_url: Option<String>,
    pub collection_view_url: Option<String>,
    pub artwork_url100: Option<String>,
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,
}

impl SearchResult {
    /// Page URL of this hit for the requested entity type
    pub fn link(&self, item_type: ItemType) -> Option<&str> {
        match item_type {
            ItemType::Album => self.collection_view_url.as_deref(),
            ItemType::Artist => self
                .artist_link_url
                .as_deref()
                .or(self.artist_view_url.as_deref()),
        }
        .filter(|link| !link.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_metadata_requires_name_or_about() {
        let mut artist = Artist::default();
        assert!(!artist.has_metadata());

        artist.about = Some(String::new());
        assert!(artist.has_metadata());

        let album = Album {
            name: "OK Computer".to_string(),
            ..Album::default()
        };
        assert!(album.has_metadata());
    }

    #[test]
    fn test_production_year_from_release_date() {
        let album = Album {
            release_date: NaiveDate::from_ymd_opt(1997, 5, 21),
            ..Album::default()
        };
        assert_eq!(album.production_year(), Some(1997));
        assert_eq!(Album::default().production_year(), None);
    }

    #[test]
    fn test_artist_stub_derives_id() {
        let artist = Artist::stub("Radiohead", "https://music.apple.com/us/artist/radiohead/657515");
        assert_eq!(artist.id.as_deref(), Some("657515"));
        assert!(artist.about.is_none());
        assert!(artist.image_url.is_none());
    }

    #[test]
    fn test_remote_item_conversions() {
        let item = RemoteItem::Artist(Artist::stub("Björk", "https://music.apple.com/us/artist/bjork/295015"));
        assert_eq!(item.item_type(), ItemType::Artist);
        assert_eq!(item.as_item().name(), "Björk");
        assert!(item.clone().into_album().is_none());
        assert!(item.into_artist().is_some());
    }

    #[test]
    fn test_item_type_search_params() {
        assert_eq!(ItemType::Album.search_entity(), "album");
        assert_eq!(ItemType::Artist.search_attribute(), "artistTerm");
        assert_eq!(ItemType::Artist.category_label(), "Artists");
        assert_eq!(ItemType::Album.to_string(), "album");
    }

    #[test]
    fn test_search_result_link_prefers_artist_link_url() {
        let json = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "artist",
                "artistName": "Massive Attack",
                "artistLinkUrl": "https://music.apple.com/us/artist/massive-attack/152095?uo=4",
                "artistId": 152095
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_count, 1);
        let hit = &response.results[0];
        assert_eq!(
            hit.link(ItemType::Artist),
            Some("https://music.apple.com/us/artist/massive-attack/152095?uo=4")
        );
        assert_eq!(hit.link(ItemType::Album), None);
    }
}
