//! Error types for the QuickFS API client.

use thiserror::Error;

/// Errors that can occur when using the QuickFS API.
#[derive(Debug, Error)]
pub enum QuickFsError {
    /// Missing API key.
    #[error("QUICKFS_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("QuickFS API error: {0}")]
    Api(String),

    /// Rate limit or daily quota exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}

impl QuickFsError {
    /// Whether a retry might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(QuickFsError::RateLimitExceeded.is_retryable());
        assert!(!QuickFsError::MissingApiKey.is_retryable());
        assert!(!QuickFsError::Api("bad metric".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            QuickFsError::Api("HTTP 400".into()).to_string(),
            "QuickFS API error: HTTP 400"
        );
    }
}
