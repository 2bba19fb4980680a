//! External catalog identifiers and their URL templates
//!
//! The host stores a `(ProviderKey, id)` pair against each library item.
//! Nothing else about these ids is interpreted here: they are only turned
//! back into fetchable page URLs.

use std::collections::BTreeMap;
use std::fmt;

use applemusic_shared_config::AppleMusicConfig;
use serde::{Deserialize, Serialize};

/// Display name of this provider
pub const PROVIDER_NAME: &str = "Apple Music";

/// Which catalog entity an external id names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKey {
    Album,
    AlbumArtist,
    Artist,
}

/// Host media type an external id applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalIdMediaType {
    Album,
    AlbumArtist,
    Artist,
}

impl ProviderKey {
    /// Stable key under which the host stores the id
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKey::Album => "ITunesAlbum",
            ProviderKey::AlbumArtist => "ITunesAlbumArtist",
            ProviderKey::Artist => "ITunesArtist",
        }
    }

    /// Numeric code registered with the host
    pub fn code(&self) -> u32 {
        match self {
            ProviderKey::Album => 11_448_800,
            ProviderKey::AlbumArtist => 11_448_801,
            ProviderKey::Artist => 11_448_802,
        }
    }

    pub fn media_type(&self) -> ExternalIdMediaType {
        match self {
            ProviderKey::Album => ExternalIdMediaType::Album,
            ProviderKey::AlbumArtist => ExternalIdMediaType::AlbumArtist,
            ProviderKey::Artist => ExternalIdMediaType::Artist,
        }
    }

    /// URL format string with a `{0}` placeholder for the id
    pub fn url_format(&self, config: &AppleMusicConfig) -> String {
        match self {
            ProviderKey::Album => config.album_url_format(),
            ProviderKey::AlbumArtist | ProviderKey::Artist => config.artist_url_format(),
        }
    }

    /// Canonical page URL for a stored id; `None` for blank ids
    pub fn url_for(&self, id: &str, config: &AppleMusicConfig) -> Option<String> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        Some(self.url_format(config).replace("{0}", id))
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider id map carried on host items, keyed by [`ProviderKey::as_str`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderIds(BTreeMap<String, String>);

impl ProviderIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blank id stored for `key`
    pub fn get(&self, key: ProviderKey) -> Option<&str> {
        self.0
            .get(key.as_str())
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    /// Store an id; blank ids are ignored
    pub fn set(&mut self, key: ProviderKey, id: impl Into<String>) {
        let id = id.into();
        if !id.trim().is_empty() {
            self.0.insert(key.as_str().to_string(), id);
        }
    }

    pub fn with(mut self, key: ProviderKey, id: impl Into<String>) -> Self {
        self.set(key, id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical page URL for the id stored under `key`
    pub fn provider_url(&self, key: ProviderKey, config: &AppleMusicConfig) -> Option<String> {
        self.get(key).and_then(|id| key.url_for(id, config))
    }
}

/// Catalog id of a page URL: its last non-empty path segment
///
/// `https://music.apple.com/us/album/ok-computer/1097861387?l=en` → `1097861387`
pub fn item_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(':'))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_provider_key_strings() {
        assert_eq!(ProviderKey::Album.as_str(), "ITunesAlbum");
        assert_eq!(ProviderKey::AlbumArtist.to_string(), "ITunesAlbumArtist");
        assert_eq!(ProviderKey::Artist.code(), 11_448_802);
        assert_eq!(ProviderKey::AlbumArtist.media_type(), ExternalIdMediaType::AlbumArtist);
    }

    #[test]
    fn test_url_for_uses_storefront() {
        let config = AppleMusicConfig::default();
        assert_eq!(
            ProviderKey::Album.url_for("1097861387", &config).as_deref(),
            Some("https://music.apple.com/us/album/1097861387")
        );
        assert_eq!(
            ProviderKey::AlbumArtist.url_for("657515", &config).as_deref(),
            Some("https://music.apple.com/us/artist/657515")
        );
        assert_eq!(ProviderKey::Artist.url_for("  ", &config), None);
    }

    #[test]
    fn test_provider_ids_round_trip() {
        let config = AppleMusicConfig::default();
        let ids = ProviderIds::new()
            .with(ProviderKey::Album, "1097861387")
            .with(ProviderKey::Artist, "");

        assert_eq!(ids.get(ProviderKey::Album), Some("1097861387"));
        assert_eq!(ids.get(ProviderKey::Artist), None);
        assert_eq!(
            ids.provider_url(ProviderKey::Album, &config).as_deref(),
            Some("https://music.apple.com/us/album/1097861387")
        );
        assert_eq!(ids.provider_url(ProviderKey::AlbumArtist, &config), None);
    }

    #[test]
    fn test_provider_ids_serialize_as_map() {
        let ids = ProviderIds::new().with(ProviderKey::Album, "42");
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"{"ITunesAlbum":"42"}"#);
    }

    #[rstest]
    #[case("https://music.apple.com/us/album/ok-computer/1097861387", Some("1097861387"))]
    #[case("https://music.apple.com/us/album/ok-computer/1097861387?uo=4", Some("1097861387"))]
    #[case("https://music.apple.com/us/artist/radiohead/657515/", Some("657515"))]
    #[case("https://music.apple.com/us/artist/657515#top", Some("657515"))]
    #[case("https://", None)]
    #[case("", None)]
    fn test_item_id_from_url(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(item_id_from_url(url).as_deref(), expected);
    }
}
