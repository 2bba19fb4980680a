//! Apple Music / iTunes endpoint configuration types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Default Apple Music web frontend
pub const DEFAULT_BASE_URL: &str = "https://music.apple.com";

/// Default iTunes Search JSON endpoint
pub const DEFAULT_SEARCH_API_URL: &str = "https://itunes.apple.com/search";

/// Default storefront
pub const DEFAULT_COUNTRY_CODE: &str = "us";

/// Most retry attempts `APPLE_MUSIC_MAX_RETRIES` may ask for
pub const MAX_RETRIES: u32 = 10;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; applemusic-metadata/0.1)";

/// Which upstream answers text searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// Scrape the Apple Music web search results page
    #[default]
    Web,
    /// Query the classic iTunes Search JSON API
    Itunes,
}

impl FromStr for SearchBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" | "applemusic" | "apple-music" => Ok(Self::Web),
            "itunes" | "json" | "api" => Ok(Self::Itunes),
            other => Err(ConfigError::InvalidValue(
                "APPLE_MUSIC_SEARCH_BACKEND".to_string(),
                format!("unknown search backend '{}'", other),
            )),
        }
    }
}

impl fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web => write!(f, "web"),
            Self::Itunes => write!(f, "itunes"),
        }
    }
}

/// Apple Music endpoint and HTTP client configuration
#[derive(Debug, Clone)]
pub struct AppleMusicConfig {
    /// Web frontend root (without storefront)
    pub base_url: String,

    /// Storefront / country code used in every URL
    pub country_code: String,

    /// iTunes Search JSON endpoint
    pub search_api_url: String,

    /// Backend used for text searches
    pub search_backend: SearchBackend,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Retry attempts for transient HTTP failures (0 disables retries)
    pub max_retries: u32,

    /// Response cache TTL in seconds (0 disables the cache)
    pub cache_ttl_secs: u64,
}

impl AppleMusicConfig {
    /// Load Apple Music configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let search_backend = match std::env::var("APPLE_MUSIC_SEARCH_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => SearchBackend::default(),
        };

        let config = Self {
            base_url: get_env_or_default("APPLE_MUSIC_BASE_URL", DEFAULT_BASE_URL),
            country_code: get_env_or_default("APPLE_MUSIC_COUNTRY", DEFAULT_COUNTRY_CODE),
            search_api_url: get_env_or_default("ITUNES_SEARCH_URL", DEFAULT_SEARCH_API_URL),
            search_backend,
            timeout_secs: parse_env("APPLE_MUSIC_TIMEOUT", 30)?,
            connect_timeout_secs: parse_env("APPLE_MUSIC_CONNECT_TIMEOUT", 10)?,
            user_agent: get_env_or_default("APPLE_MUSIC_USER_AGENT", DEFAULT_USER_AGENT),
            max_retries: parse_env("APPLE_MUSIC_MAX_RETRIES", 2)?,
            cache_ttl_secs: parse_env("APPLE_MUSIC_CACHE_TTL", 0)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create a configuration pointing both endpoints at a custom host (useful for testing)
    ///
    /// Retries are disabled so failures surface immediately.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        let base_url = url.into();
        let search_api_url = format!("{}/search", base_url.trim_end_matches('/'));
        Self {
            base_url,
            search_api_url,
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Select the search backend
    pub fn with_search_backend(mut self, backend: SearchBackend) -> Self {
        self.search_backend = backend;
        self
    }

    /// Check that URLs and the country code are usable
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("APPLE_MUSIC_BASE_URL", &self.base_url),
            ("ITUNES_SEARCH_URL", &self.search_api_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(
                    name.to_string(),
                    format!("'{}' must start with http:// or https://", value),
                ));
            }
        }

        let country = self.country_code.trim();
        if country.is_empty() || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCountry(self.country_code.clone()));
        }

        if self.max_retries > MAX_RETRIES {
            return Err(ConfigError::InvalidValue(
                "APPLE_MUSIC_MAX_RETRIES".to_string(),
                format!("{} exceeds the limit of {}", self.max_retries, MAX_RETRIES),
            ));
        }

        Ok(())
    }

    /// Storefront root, e.g. `https://music.apple.com/us`
    pub fn storefront_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.country_code.trim().to_lowercase()
        )
    }

    /// Web search results page (without query string)
    pub fn web_search_url(&self) -> String {
        format!("{}/search", self.storefront_url())
    }

    /// URL format string for albums; `{0}` is replaced by the album id
    pub fn album_url_format(&self) -> String {
        format!("{}/album/{{0}}", self.storefront_url())
    }

    /// URL format string for artists; `{0}` is replaced by the artist id
    pub fn artist_url_format(&self) -> String {
        format!("{}/artist/{{0}}", self.storefront_url())
    }
}

impl Default for AppleMusicConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            search_backend: SearchBackend::Web,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: 2,
            cache_ttl_secs: 0,
        }
    }
}
