//! Provider configuration loaded from environment variables
//!
//! Endpoint and HTTP settings come from the shared Apple Music configuration;
//! this module adds the resolver tuning knobs.

use std::env;

use anyhow::{Context, Result};
use applemusic_shared_config::{AppleMusicConfig, CommonConfig};

/// Default bound on concurrent nested artist fetches
pub const DEFAULT_ARTIST_CONCURRENCY: usize = 4;

/// Default cap on candidates processed by search-result listings
pub const DEFAULT_SEARCH_RESULT_LIMIT: usize = 10;

/// Provider configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other components
    pub common: CommonConfig,

    /// Maximum concurrent artist page fetches while enriching an album
    pub artist_concurrency: usize,

    /// Maximum candidates scraped by `get_search_results`
    pub search_result_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::load()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let artist_concurrency: usize = env::var("PROVIDER_ARTIST_CONCURRENCY")
            .unwrap_or_else(|_| DEFAULT_ARTIST_CONCURRENCY.to_string())
            .trim()
            .parse()
            .context("Invalid PROVIDER_ARTIST_CONCURRENCY value")?;

        let search_result_limit: usize = env::var("PROVIDER_SEARCH_LIMIT")
            .unwrap_or_else(|_| DEFAULT_SEARCH_RESULT_LIMIT.to_string())
            .trim()
            .parse()
            .context("Invalid PROVIDER_SEARCH_LIMIT value")?;

        if artist_concurrency == 0 {
            anyhow::bail!("PROVIDER_ARTIST_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            common,
            artist_concurrency,
            search_result_limit,
        })
    }

    /// Configuration for tests against a mock server
    pub fn with_apple_music(apple_music: AppleMusicConfig) -> Self {
        Self {
            common: CommonConfig {
                apple_music,
                ..CommonConfig::default()
            },
            ..Self::default()
        }
    }

    /// Get Apple Music configuration
    pub fn apple_music(&self) -> &AppleMusicConfig {
        &self.common.apple_music
    }

    /// Get the log filter
    pub fn log_level(&self) -> &str {
        &self.common.log_level
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            common: CommonConfig::default(),
            artist_concurrency: DEFAULT_ARTIST_CONCURRENCY,
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
        }
    }
}
