//! Error handling for the metadata provider
//!
//! Absence (nothing found, not enough local data to search) is modelled as an
//! error internally so the pipeline can short-circuit with `?`, but the
//! host-facing operations turn it into an empty result. Only fetch failures
//! on single-result paths and cancellation reach the caller.

use applemusic_client::AppleMusicError;
use applemusic_shared_config::ConfigError;
use thiserror::Error;

/// Provider error type
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Search returned nothing, or a page held no usable record
    #[error("not found: {0}")]
    NotFound(String),

    /// Local metadata is too sparse to build a search term
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Network, timeout or HTTP status failure
    #[error("fetch failed: {0}")]
    Fetch(AppleMusicError),

    /// A document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// The caller cancelled the resolution
    #[error("resolution cancelled")]
    Cancelled,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Whether this is a cancellation outcome rather than a failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether this error only means "nothing to return"
    pub fn is_absence(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InsufficientData(_))
    }

    /// Whether retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Get a severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration(_) => ErrorSeverity::Critical,
            Self::Fetch(_) => ErrorSeverity::Error,
            Self::Parse(_) | Self::Cancelled => ErrorSeverity::Warning,
            Self::NotFound(_) | Self::InsufficientData(_) => ErrorSeverity::Info,
        }
    }

    /// Log the error with appropriate severity
    pub fn log(&self) {
        match self.severity() {
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %self,
                    retryable = self.is_retryable(),
                    "Critical provider error"
                );
            }
            ErrorSeverity::Error => {
                tracing::error!(
                    error = %self,
                    retryable = self.is_retryable(),
                    "Provider error"
                );
            }
            ErrorSeverity::Warning => {
                tracing::warn!(
                    error = %self,
                    retryable = self.is_retryable(),
                    "Provider warning"
                );
            }
            ErrorSeverity::Info => {
                tracing::info!(error = %self, "Provider found nothing");
            }
        }
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an insufficient data error
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData(reason.into())
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Misconfiguration that stops every call
    Critical,
    /// Standard errors
    Error,
    /// Warnings for expected interruptions
    Warning,
    /// Normal "nothing found" outcomes
    Info,
}

/// Result type alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

// ========== Conversion Implementations ==========

impl From<AppleMusicError> for ProviderError {
    fn from(err: AppleMusicError) -> Self {
        match err {
            AppleMusicError::Cancelled => Self::Cancelled,
            AppleMusicError::Parse(e) => Self::Parse(e.to_string()),
            AppleMusicError::InvalidUrl { .. } => Self::Configuration(err.to_string()),
            other => Self::Fetch(other),
        }
    }
}

impl From<ConfigError> for ProviderError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
