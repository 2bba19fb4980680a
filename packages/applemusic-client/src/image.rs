//! Artwork URL size rewriting
//!
//! Apple artwork URLs end in a size/crop token followed by the extension,
//! e.g. `.../source/1200x1200bf-60.jpg` or the iTunes Search API baseline
//! `.../100x100bb.jpg`. The image server renders whatever size the last
//! path segment asks for, so resizing means swapping that segment.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A `{width}x{height}` token at the start of the final path segment
static SIZE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+x\d+").expect("size token pattern is valid"));

const DEFAULT_EXTENSION: &str = "jpg";

/// Target artwork size, rendered as `{width}x{height}{crop}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub crop: &'static str,
}

impl ImageSize {
    /// List thumbnails
    pub const THUMBNAIL: ImageSize = ImageSize::new(100, 100, "cc");
    /// Primary images
    pub const DEFAULT: ImageSize = ImageSize::new(1400, 1400, "cc");
    pub const BACKDROP: ImageSize = ImageSize::new(1920, 1080, "cc");

    pub const fn new(width: u32, height: u32, crop: &'static str) -> Self {
        Self { width, height, crop }
    }

    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{}", self.width, self.height, self.crop)
    }
}

/// Replace the trailing size token of an artwork URL with `token`
///
/// Everything up to the last `/` and the file extension are kept. URLs whose
/// last segment does not start with a size token are returned unchanged.
/// Applying the same token twice yields the same URL.
pub fn resize(url: &str, token: &str) -> String {
    let Some(idx) = url.rfind('/') else {
        return url.to_string();
    };
    let (prefix, segment) = url.split_at(idx + 1);

    let (stem, extension) = match segment.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => (stem, ext),
        _ => (segment, DEFAULT_EXTENSION),
    };

    if !SIZE_TOKEN.is_match(stem) {
        debug!(url = %url, "Image URL has no size token, leaving it unchanged");
        return url.to_string();
    }

    format!("{}{}.{}", prefix, token, extension)
}

/// Resize to one of the [`ImageSize`] presets
pub fn resize_to(url: &str, size: ImageSize) -> String {
    resize(url, &size.token())
}
