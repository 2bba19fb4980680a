//! Search endpoints: the Apple Music web results page and the iTunes Search API
//!
//! Both backends answer the same question, an ordered list of page URLs for a
//! term, so the service picks one from configuration and the resolvers never
//! see the difference.

use std::collections::HashSet;

use applemusic_shared_config::{AppleMusicConfig, SearchBackend};
use once_cell::sync::Lazy;
use scraper::Selector;
use tracing::debug;
use url::Url;

use crate::error::{AppleMusicError, AppleMusicResult};
use crate::fetcher::{Document, DocumentKind};
use crate::models::{ItemType, SearchResponse};

static ALBUM_RESULTS: Lazy<Selector> = Lazy::new(|| results_selector(ItemType::Album));
static ARTIST_RESULTS: Lazy<Selector> = Lazy::new(|| results_selector(ItemType::Artist));

fn results_selector(item_type: ItemType) -> Selector {
    let section = format!(
        "div[data-testid='section-container'][aria-label='{}'] li a",
        item_type.category_label()
    );
    let css = match item_type {
        ItemType::Album => format!("{section}[data-testid='product-lockup-title']"),
        ItemType::Artist => section,
    };
    Selector::parse(&css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Fetch mode the configured backend answers in
pub fn document_kind(backend: SearchBackend) -> DocumentKind {
    match backend {
        SearchBackend::Web => DocumentKind::Html,
        SearchBackend::Itunes => DocumentKind::Json,
    }
}

/// Request URL for a search, with the term percent-encoded
pub fn search_url(
    config: &AppleMusicConfig,
    term: &str,
    item_type: ItemType,
) -> AppleMusicResult<String> {
    let country = config.country_code.trim().to_lowercase();
    let (base, params): (String, Vec<(&str, &str)>) = match config.search_backend {
        SearchBackend::Web => (config.web_search_url(), vec![("term", term)]),
        SearchBackend::Itunes => (
            config.search_api_url.clone(),
            vec![
                ("term", term),
                ("media", "music"),
                ("entity", item_type.search_entity()),
                ("attribute", item_type.search_attribute()),
                ("country", country.as_str()),
            ],
        ),
    };

    let url = Url::parse_with_params(&base, &params)
        .map_err(|e| AppleMusicError::invalid_url(base.as_str(), e))?;
    Ok(url.to_string())
}

/// Ordered result URLs from a fetched search document
pub fn parse_results(document: &Document, item_type: ItemType) -> AppleMusicResult<Vec<String>> {
    let urls = match document.kind {
        DocumentKind::Html => parse_web_results(document, item_type),
        DocumentKind::Json => parse_api_results(document, item_type)?,
    };
    debug!(
        url = %document.url,
        item_type = %item_type,
        results = urls.len(),
        "Parsed search results"
    );
    Ok(urls)
}

fn parse_web_results(document: &Document, item_type: ItemType) -> Vec<String> {
    let selector = match item_type {
        ItemType::Album => &*ALBUM_RESULTS,
        ItemType::Artist => &*ARTIST_RESULTS,
    };
    let base = Url::parse(&document.url).ok();
    let html = document.html();

    let links = html
        .select(selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| match &base {
            Some(base) => base.join(href).ok().map(|url| url.to_string()),
            None => Some(href.to_string()),
        });
    dedup(links)
}

fn parse_api_results(document: &Document, item_type: ItemType) -> AppleMusicResult<Vec<String>> {
    let response: SearchResponse = document.json()?;
    if response.result_count == 0 {
        return Ok(Vec::new());
    }

    let links = response
        .results
        .iter()
        .filter_map(|result| result.link(item_type))
        .map(strip_query);
    Ok(dedup(links))
}

/// Drop the query string and fragment the API appends (`?uo=4`)
fn strip_query(link: &str) -> String {
    link.split(['?', '#']).next().unwrap_or(link).to_string()
}

/// Keep first occurrences, preserving order
fn dedup(links: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links.filter(|link| seen.insert(link.clone())).collect()
}
