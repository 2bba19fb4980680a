//! Apple Music web / iTunes Search client
//!
//! This crate provides the network-facing half of the metadata pipeline:
//! - Fetching HTML pages and iTunes Search JSON ([`DocumentFetcher`])
//! - Extracting typed album and artist records from pages ([`extract`])
//! - Searching either backend for candidate page URLs
//! - Rewriting artwork URLs to a requested size ([`resize`])
//! - Round-tripping stored provider ids into page URLs ([`ProviderKey`])
//!
//! # Example
//!
//! ```rust,no_run
//! use applemusic_client::{AppleMusicService, ItemType};
//! use applemusic_shared_config::AppleMusicConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AppleMusicService::from_config(AppleMusicConfig::default())?;
//! let cancel = CancellationToken::new();
//!
//! let urls = service.search("Portishead Dummy", ItemType::Album, &cancel).await?;
//! if let Some(url) = urls.first() {
//!     let album = service.scrape(url, ItemType::Album, &cancel).await?;
//!     println!("{:?}", album);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! See `applemusic_shared_config::AppleMusicConfig::from_env`.

mod cache;
mod error;
mod extractor;
mod fetcher;
mod image;
mod models;
mod provider_key;
mod search;
mod service;

pub use cache::CachingFetcher;
pub use error::{AppleMusicError, AppleMusicResult};
pub use extractor::{extract, parse_release_date};
pub use fetcher::{Document, DocumentFetcher, DocumentKind, HttpFetcher};
pub use image::{resize, resize_to, ImageSize};
pub use models::{Album, Artist, ItemType, RemoteItem, RemoteMusicItem};
pub use provider_key::{item_id_from_url, ExternalIdMediaType, ProviderIds, ProviderKey, PROVIDER_NAME};
pub use search::search_url;
pub use service::{cancellable, AppleMusicService};
