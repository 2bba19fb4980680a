use thiserror::Error;

/// Why the Apple Music configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `{0}` held a value that does not parse
    #[error("{0} has an unusable value: {1}")]
    InvalidValue(String, String),

    /// An endpoint variable is not an http(s) URL
    #[error("{0} is not a usable endpoint: {1}")]
    InvalidUrl(String, String),

    /// Storefront codes are short alphabetic codes such as `us` or `gb`
    #[error("storefront country code '{0}' is not a non-empty alphabetic code")]
    InvalidCountry(String),
}

impl ConfigError {
    /// Environment variable the error points at, if any
    pub fn variable(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue(name, _) | ConfigError::InvalidUrl(name, _) => Some(name),
            ConfigError::InvalidCountry(_) => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable() {
        let err = ConfigError::InvalidValue("APPLE_MUSIC_TIMEOUT".to_string(), "nope".to_string());
        assert_eq!(err.variable(), Some("APPLE_MUSIC_TIMEOUT"));
        assert_eq!(ConfigError::InvalidCountry("1".to_string()).variable(), None);
        assert_eq!(
            ConfigError::InvalidCountry("1".to_string()).to_string(),
            "storefront country code '1' is not a non-empty alphabetic code"
        );
    }
}
