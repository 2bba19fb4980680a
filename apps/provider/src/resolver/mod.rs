//! Album and artist resolvers
//!
//! A resolution walks `lookup → candidate URLs → fetch → extract`, and for
//! albums one more level into the album's artists. Absence at any step ends
//! the walk with an empty result; fetch failures on single-result paths and
//! cancellation reach the caller.

mod album;
mod artist;

pub use album::{matches_year, AlbumResolver};
pub use artist::ArtistResolver;

use applemusic_client::{AppleMusicService, ItemType};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_ARTIST_CONCURRENCY, DEFAULT_SEARCH_RESULT_LIMIT};
use crate::error::{ProviderError, ProviderResult};
use crate::term::LookupTarget;

/// Fan-out limits shared by the resolvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Concurrent artist page fetches per album
    pub artist_concurrency: usize,
    /// Candidates scraped per search-result listing
    pub search_result_limit: usize,
}

impl ResolverOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            artist_concurrency: config.artist_concurrency,
            search_result_limit: config.search_result_limit,
        }
    }

    fn concurrency(&self) -> usize {
        self.artist_concurrency.max(1)
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            artist_concurrency: DEFAULT_ARTIST_CONCURRENCY,
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
        }
    }
}

/// Candidate page URLs for a lookup, in search order
///
/// A stored id yields exactly its canonical URL; an empty search is
/// [`ProviderError::NotFound`].
pub(crate) async fn candidate_urls(
    service: &AppleMusicService,
    target: LookupTarget,
    item_type: ItemType,
    cancel: &CancellationToken,
) -> ProviderResult<Vec<String>> {
    debug!(item_type = %item_type, lookup = %target.as_str(), "Resolving candidates");
    match target {
        LookupTarget::ProviderUrl(url) => Ok(vec![url]),
        LookupTarget::Search(term) => {
            let urls = service.search(&term, item_type, cancel).await?;
            if urls.is_empty() {
                return Err(ProviderError::not_found(format!(
                    "no {} search results for '{}'",
                    item_type, term
                )));
            }
            debug!(term = %term, candidates = urls.len(), "Search returned candidates");
            Ok(urls)
        }
    }
}

/// Turn "nothing found" into an empty value
pub(crate) fn recover_absence<T>(
    result: ProviderResult<T>,
    empty: impl FnOnce() -> T,
) -> ProviderResult<T> {
    match result {
        Err(e) if e.is_absence() => {
            e.log();
            Ok(empty())
        }
        other => other,
    }
}

/// Skip a failed candidate in a batch, except for cancellation
pub(crate) fn skip_failed_candidate<T>(
    url: &str,
    result: ProviderResult<Option<T>>,
) -> ProviderResult<Option<T>> {
    match result {
        Err(e) if e.is_cancellation() => Err(e),
        Err(e) => {
            warn!(url = %url, error = %e, "Skipping candidate");
            Ok(None)
        }
        ok => ok,
    }
}
