//! Field extraction from Apple Music web pages
//!
//! Every selector the scraper depends on lives in this module so markup
//! changes on the remote site only touch this file.
//!
//! Extraction of a page lacking the primary heading yields `None`. That is
//! an expected outcome, logged at debug level, and not an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error};
use url::Url;

use crate::fetcher::Document;
use crate::image::{resize_to, ImageSize};
use crate::models::{Album, Artist, ItemType, RemoteItem};
use crate::provider_key::item_id_from_url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

static OG_IMAGE: Lazy<Selector> = Lazy::new(|| selector("meta[property='og:image']"));
static DETAIL_HEADER: Lazy<Selector> =
    Lazy::new(|| selector("div[data-testid='container-detail-header']"));
static ALBUM_NAME: Lazy<Selector> =
    Lazy::new(|| selector("h1[data-testid='non-editable-product-title']"));
static ALBUM_ARTIST_LINK: Lazy<Selector> = Lazy::new(|| selector("a[data-testid='click-action']"));
static TRUNCATED_TEXT: Lazy<Selector> = Lazy::new(|| selector("p[data-testid='truncate-text']"));
static ALBUM_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector("p[data-testid='tracklist-footer-description']"));
static ARTIST_NAME: Lazy<Selector> = Lazy::new(|| selector("h1[data-testid='artist-header-name']"));

/// Footer text such as `June 16, 1995\n12 Songs, 52 minutes\n℗ 1995 Maverick`
static ALBUM_DESCRIPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<date>\w+ \d+, \d+)\W(?P<runtime>\d+)\W+(?P<runtime_unit>\w+)\W+(?P<production_year>\d+)\W+(?P<producer>\w+)",
    )
    .expect("album description pattern is valid")
});

const RELEASE_DATE_FORMAT: &str = "%B %d, %Y";

/// Placeholder artwork served for artists without a picture
const GENERIC_ARTIST_IMAGE: &str = "apple-music.png";

/// Pull a typed record out of a fetched page
///
/// The returned record's `url` is the document URL and its `id` the last
/// path segment of that URL.
pub fn extract(document: &Document, item_type: ItemType) -> Option<RemoteItem> {
    let html = document.html();
    let base = Url::parse(&document.url).ok();

    let mut item = match item_type {
        ItemType::Album => extract_album(&html, base.as_ref()).map(RemoteItem::Album)?,
        ItemType::Artist => extract_artist(&html).map(RemoteItem::Artist)?,
    };

    let id = item_id_from_url(&document.url);
    match &mut item {
        RemoteItem::Album(album) => {
            album.url = document.url.clone();
            album.id = id;
        }
        RemoteItem::Artist(artist) => {
            artist.url = document.url.clone();
            artist.id = id;
        }
    }

    Some(item)
}

/// Album page: heading, artist links and about text live under the detail header
pub fn extract_album(html: &Html, base: Option<&Url>) -> Option<Album> {
    let header = html.select(&DETAIL_HEADER).next();

    let Some(name) = header
        .and_then(|header| header.select(&ALBUM_NAME).next())
        .map(|node| text_of(node).trim().to_string())
    else {
        debug!("Album name not found");
        return None;
    };

    let image_url = og_image(html, |_| true);
    if image_url.is_none() {
        error!(album = %name, "No album image found");
    }

    let artists: Vec<Artist> = header
        .map(|header| {
            header
                .select(&ALBUM_ARTIST_LINK)
                .filter_map(|node| artist_stub(node, base))
                .collect()
        })
        .unwrap_or_default();
    if artists.is_empty() {
        debug!(album = %name, "No album artists found");
        return None;
    }

    let about = header
        .and_then(|header| header.select(&TRUNCATED_TEXT).next())
        .map(trimmed_text);

    let release_date = html
        .select(&ALBUM_DESCRIPTION)
        .next()
        .map(text_of)
        .and_then(|text| parse_release_date(&text));

    Some(Album {
        name,
        image_url,
        about,
        artists,
        release_date,
        ..Album::default()
    })
}

/// Artist page: heading, bio and a non-placeholder og:image
pub fn extract_artist(html: &Html) -> Option<Artist> {
    let Some(name) = html
        .select(&ARTIST_NAME)
        .next()
        .map(|node| text_of(node).trim().to_string())
    else {
        debug!("Artist name not found");
        return None;
    };

    let about = html.select(&TRUNCATED_TEXT).next().map(trimmed_text);
    if about.is_none() {
        debug!(artist = %name, "Artist overview not found");
    }

    let image_url = og_image(html, |content| !content.contains(GENERIC_ARTIST_IMAGE))
        .map(|url| resize_to(&url, ImageSize::DEFAULT));
    if image_url.is_none() {
        debug!(artist = %name, "Artist image not found");
    }

    Some(Artist {
        name,
        about,
        image_url,
        ..Artist::default()
    })
}

/// Release date from the album footer description
///
/// Only the leading date is kept; the rest of the pattern just anchors the match.
pub fn parse_release_date(description: &str) -> Option<NaiveDate> {
    let Some(captures) = ALBUM_DESCRIPTION_PATTERN.captures(description) else {
        debug!(description = %description, "Failed to parse album description");
        return None;
    };

    let date = captures.name("date")?.as_str();
    match NaiveDate::parse_from_str(date, RELEASE_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(date = %date, error = %e, "Failed to parse album release date");
            None
        }
    }
}

fn artist_stub(node: ElementRef<'_>, base: Option<&Url>) -> Option<Artist> {
    let href = node.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let url = match base {
        Some(base) => base.join(href).ok()?.to_string(),
        None => href.to_string(),
    };
    Some(Artist::stub(text_of(node).trim(), url))
}

fn og_image(html: &Html, accept: impl Fn(&str) -> bool) -> Option<String> {
    html.select(&OG_IMAGE)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty() && accept(*content))
        .map(str::to_string)
}

fn text_of(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// A present node yields its text even when blank; only a missing node means no text
fn trimmed_text(node: ElementRef<'_>) -> String {
    text_of(node).trim().to_string()
}
