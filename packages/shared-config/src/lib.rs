//! Shared configuration types for the Apple Music metadata provider
//!
//! This crate provides the configuration types used by the client library
//! and the provider application, ensuring both agree on endpoints,
//! storefront and HTTP behaviour.

mod apple_music;
mod error;

pub use apple_music::{
    AppleMusicConfig, SearchBackend, DEFAULT_BASE_URL, DEFAULT_COUNTRY_CODE, MAX_RETRIES,
    DEFAULT_SEARCH_API_URL,
};
pub use error::{ConfigError, ConfigResult};

use std::env;

/// Common configuration shared between all components
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Apple Music endpoint configuration
    pub apple_music: AppleMusicConfig,

    /// Log level (from RUST_LOG or LOG_LEVEL)
    pub log_level: String,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            apple_music: AppleMusicConfig::from_env()?,
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Load a `.env` file if one exists, then read the environment
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            apple_music: AppleMusicConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
