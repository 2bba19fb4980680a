//! Search term building from noisy local metadata
//!
//! A stored provider id always wins: it is turned into the canonical page URL
//! and no search happens at all.

use applemusic_client::ProviderKey;
use applemusic_shared_config::AppleMusicConfig;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::info::{AlbumInfo, ArtistInfo};

/// How a resolver reaches its candidate pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// Canonical page URL built from a stored provider id
    ProviderUrl(String),
    /// Free-text search term
    Search(String),
}

impl LookupTarget {
    /// The URL or the term
    pub fn as_str(&self) -> &str {
        match self {
            LookupTarget::ProviderUrl(url) => url,
            LookupTarget::Search(term) => term,
        }
    }
}

/// Decide how to look up an album
///
/// Fails with [`ProviderError::InsufficientData`] when no stored id exists
/// and no artist hint is available.
pub fn album_lookup(info: &AlbumInfo, config: &AppleMusicConfig) -> ProviderResult<LookupTarget> {
    if let Some(url) = info.provider_ids.provider_url(ProviderKey::Album, config) {
        debug!(url = %url, "Using stored album id");
        return Ok(LookupTarget::ProviderUrl(url));
    }

    build_album_search_term(info)
        .map(LookupTarget::Search)
        .ok_or_else(|| {
            ProviderError::insufficient_data(format!(
                "not enough local metadata to search for album '{}'",
                info.name
            ))
        })
}

/// `"{artist} {album}"` for an album without a stored id
///
/// The artist comes from the album-artist field, else from the first track.
/// When the album name is blank, or is really the artist name repeated, the
/// first track's album field is used instead if it has one.
pub fn build_album_search_term(info: &AlbumInfo) -> Option<String> {
    let first_song = info.first_song();

    let Some(artist_name) = first_non_blank(&info.album_artists).or_else(|| {
        first_song.and_then(|song| first_non_blank(&song.album_artists))
    }) else {
        debug!(album = %info.name, "No album artist found, cannot search");
        return None;
    };

    let name = info.name.trim();
    let album_name = if name.is_empty() || same_ignoring_case(name, artist_name) {
        first_song
            .and_then(|song| song.album.as_deref())
            .map(str::trim)
            .filter(|album| !album.is_empty())
            .unwrap_or(name)
    } else {
        name
    };

    if album_name.is_empty() {
        debug!(artist = %artist_name, "No album name found, cannot search");
        return None;
    }

    Some(format!("{} {}", artist_name, album_name))
}

/// Decide how to look up an artist
pub fn artist_lookup(info: &ArtistInfo, config: &AppleMusicConfig) -> ProviderResult<LookupTarget> {
    if let Some(url) = info.provider_ids.provider_url(ProviderKey::Artist, config) {
        debug!(url = %url, "Using stored artist id");
        return Ok(LookupTarget::ProviderUrl(url));
    }

    let term = build_artist_search_term(info, config);
    if term.is_empty() {
        return Err(ProviderError::insufficient_data("artist has no name"));
    }
    Ok(LookupTarget::Search(term))
}

/// The stored id's page URL if present, otherwise the bare artist name
pub fn build_artist_search_term(info: &ArtistInfo, config: &AppleMusicConfig) -> String {
    info.provider_ids
        .provider_url(ProviderKey::Artist, config)
        .unwrap_or_else(|| info.name.trim().to_string())
}

fn first_non_blank(values: &[String]) -> Option<&str> {
    values.iter().map(|v| v.trim()).find(|v| !v.is_empty())
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
