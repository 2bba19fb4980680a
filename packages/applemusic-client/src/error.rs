//! Apple Music client error types

use thiserror::Error;

/// Apple Music client errors
#[derive(Error, Debug)]
pub enum AppleMusicError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// JSON parsing failed
    #[error("failed to parse Apple Music response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL could not be built or parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Rate limited by Apple
    #[error("rate limited by Apple Music")]
    RateLimited,

    /// Request timeout
    #[error("request to Apple Music timed out")]
    Timeout,

    /// The caller cancelled the operation
    #[error("operation cancelled")]
    Cancelled,
}

impl AppleMusicError {
    /// Check if this error is retryable (transient failure)
    ///
    /// Retries on:
    /// - Timeouts
    /// - Rate limiting
    /// - Transport errors (connect, timeout)
    /// - Server errors (5xx)
    ///
    /// Does NOT retry on client errors (4xx except 429 rate limiting).
    pub fn is_retryable(&self) -> bool {
        match self {
            AppleMusicError::Timeout | AppleMusicError::RateLimited => true,
            AppleMusicError::Status { status, .. } => *status >= 500,
            AppleMusicError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                matches!(e.status(), Some(status) if status.is_server_error())
            }
            _ => false,
        }
    }

    /// Whether this error is a cancellation rather than a data or transport failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppleMusicError::Cancelled)
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for Apple Music operations
pub type AppleMusicResult<T> = Result<T, AppleMusicError>;
