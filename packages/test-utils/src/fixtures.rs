//! HTML and JSON fixtures shaped like Apple Music pages and iTunes Search responses
//!
//! The markup only carries the `data-testid` hooks the scraper reads, not the
//! full page.

use serde_json::json;

/// Fixture for an Apple Music album page
#[derive(Debug, Clone)]
pub struct AlbumPageFixture {
    /// `None` omits the title heading entirely
    pub name: Option<String>,
    /// `(display name, href)` pairs rendered under the detail header
    pub artists: Vec<(String, String)>,
    pub about: Option<String>,
    pub image_url: Option<String>,
    /// Tracklist footer, e.g. `June 13, 1995\n13 Songs, 57 minutes\n℗ 1995 Maverick`
    pub description: Option<String>,
}

impl AlbumPageFixture {
    /// Album with a name, artwork and a parseable release footer
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            artists: Vec::new(),
            about: None,
            image_url: Some(
                "https://is1-ssl.mzstatic.com/image/thumb/Music/v4/aa/bb/cc/source/1200x630wp-60.jpg"
                    .to_string(),
            ),
            description: Some("June 13, 1995\n13 Songs, 57 minutes\n℗ 1995 Maverick".to_string()),
        }
    }

    /// Page without the title heading
    pub fn untitled() -> Self {
        Self {
            name: None,
            ..Self::new("")
        }
    }

    pub fn with_artist(mut self, name: &str, href: &str) -> Self {
        self.artists.push((name.to_string(), href.to_string()));
        self
    }

    pub fn with_about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    pub fn with_image(mut self, image_url: Option<&str>) -> Self {
        self.image_url = image_url.map(str::to_string);
        self
    }

    /// Release footer for a given date, e.g. `"October 04, 2011"`
    pub fn released(mut self, date: &str) -> Self {
        self.description = Some(format!("{}\n10 Songs, 41 minutes\n℗ 2011 Label", date));
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    /// Render as an HTML document
    pub fn to_html(&self) -> String {
        let head = meta_image(self.image_url.as_deref());
        let name = self
            .name
            .as_deref()
            .map(|name| format!(r#"<h1 data-testid="non-editable-product-title">{}</h1>"#, name))
            .unwrap_or_default();
        let artists: String = self
            .artists
            .iter()
            .map(|(name, href)| format!(r#"<a data-testid="click-action" href="{}">{}</a>"#, href, name))
            .collect();
        let about = truncated_text(self.about.as_deref());
        let description = self
            .description
            .as_deref()
            .map(|text| format!(r#"<p data-testid="tracklist-footer-description">{}</p>"#, text))
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html><html><head>{head}</head><body>\
             <div data-testid=\"container-detail-header\">{name}<div class=\"artists\">{artists}</div>{about}</div>\
             <div class=\"tracklist\">{description}</div>\
             </body></html>"
        )
    }
}

/// Fixture for an Apple Music artist page
#[derive(Debug, Clone)]
pub struct ArtistPageFixture {
    /// `None` omits the heading; `Some("")` renders an empty one
    pub name: Option<String>,
    pub about: Option<String>,
    pub image_url: Option<String>,
}

impl ArtistPageFixture {
    /// Artist with a bio and a portrait
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            about: Some(format!("Biography of {}", name)),
            image_url: Some(
                "https://is2-ssl.mzstatic.com/image/thumb/Features/v4/dd/ee/ff/source/486x486ve.jpg"
                    .to_string(),
            ),
        }
    }

    /// Artist page whose heading is present but empty, with nothing else
    pub fn blank() -> Self {
        Self {
            name: Some(String::new()),
            about: None,
            image_url: None,
        }
    }

    pub fn with_about(mut self, about: Option<&str>) -> Self {
        self.about = about.map(str::to_string);
        self
    }

    pub fn with_image(mut self, image_url: Option<&str>) -> Self {
        self.image_url = image_url.map(str::to_string);
        self
    }

    /// Render as an HTML document; always includes the generic placeholder image first
    pub fn to_html(&self) -> String {
        let placeholder = meta_image(Some("https://music.apple.com/assets/meta/apple-music.png"));
        let head = meta_image(self.image_url.as_deref());
        let name = self
            .name
            .as_deref()
            .map(|name| format!(r#"<h1 data-testid="artist-header-name">{}</h1>"#, name))
            .unwrap_or_default();
        let about = truncated_text(self.about.as_deref());

        format!(
            "<!DOCTYPE html><html><head>{placeholder}{head}</head><body>{name}{about}</body></html>"
        )
    }
}

/// Fixture for the Apple Music web search results page
#[derive(Debug, Clone, Default)]
pub struct SearchPageFixture {
    /// `(title, href)` pairs for the Albums shelf
    pub albums: Vec<(String, String)>,
    /// `(name, href)` pairs for the Artists shelf
    pub artists: Vec<(String, String)>,
}

impl SearchPageFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_album(mut self, title: &str, href: &str) -> Self {
        self.albums.push((title.to_string(), href.to_string()));
        self
    }

    pub fn with_artist(mut self, name: &str, href: &str) -> Self {
        self.artists.push((name.to_string(), href.to_string()));
        self
    }

    /// Render as an HTML document
    pub fn to_html(&self) -> String {
        let artists: String = self
            .artists
            .iter()
            .map(|(name, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
            .collect();
        // Each album lockup also links its artist via a subtitle anchor
        let albums: String = self
            .albums
            .iter()
            .map(|(title, href)| {
                format!(
                    r#"<li><a data-testid="product-lockup-title" href="{}">{}</a><a data-testid="product-lockup-subtitle" href="/us/artist/subtitle/1">Artist</a></li>"#,
                    href, title
                )
            })
            .collect();

        format!(
            "<!DOCTYPE html><html><body>\
             <div data-testid=\"section-container\" aria-label=\"Artists\"><ul>{artists}</ul></div>\
             <div data-testid=\"section-container\" aria-label=\"Albums\"><ul>{albums}</ul></div>\
             </body></html>"
        )
    }
}

/// One iTunes Search API result
#[derive(Debug, Clone, Default)]
pub struct ItunesResultFixture {
    pub wrapper_type: String,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub collection_view_url: Option<String>,
    pub artist_link_url: Option<String>,
    pub artwork_url100: Option<String>,
    pub release_date: Option<String>,
}

impl ItunesResultFixture {
    /// Album hit; the view URL carries the API's `?uo=4` suffix
    pub fn album(collection_name: &str, artist_name: &str, view_url: &str) -> Self {
        Self {
            wrapper_type: "collection".to_string(),
            artist_name: Some(artist_name.to_string()),
            collection_name: Some(collection_name.to_string()),
            collection_view_url: Some(format!("{}?uo=4", view_url)),
            artwork_url100: Some(
                "https://is1-ssl.mzstatic.com/image/thumb/Music/v4/00/11/22/100x100bb.jpg".to_string(),
            ),
            release_date: Some("1995-06-13T07:00:00Z".to_string()),
            ..Self::default()
        }
    }

    /// Artist hit; the link URL carries the API's `?uo=4` suffix
    pub fn artist(artist_name: &str, link_url: &str) -> Self {
        Self {
            wrapper_type: "artist".to_string(),
            artist_name: Some(artist_name.to_string()),
            artist_link_url: Some(format!("{}?uo=4", link_url)),
            ..Self::default()
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "wrapperType": self.wrapper_type,
            "artistName": self.artist_name,
            "collectionName": self.collection_name,
            "collectionViewUrl": self.collection_view_url,
            "artistLinkUrl": self.artist_link_url,
            "artworkUrl100": self.artwork_url100,
            "releaseDate": self.release_date
        })
    }
}

/// Full iTunes Search API envelope
pub fn itunes_search_json(results: &[ItunesResultFixture]) -> serde_json::Value {
    json!({
        "resultCount": results.len(),
        "results": results.iter().map(ItunesResultFixture::to_json).collect::<Vec<_>>()
    })
}

fn meta_image(url: Option<&str>) -> String {
    url.map(|url| format!(r#"<meta property="og:image" content="{}">"#, url))
        .unwrap_or_default()
}

fn truncated_text(text: Option<&str>) -> String {
    text.map(|text| format!(r#"<p data-testid="truncate-text">{}</p>"#, text))
        .unwrap_or_default()
}
