//! Repository Source Port - Interface for code-hosting search backends.
//!
//! This port abstracts fetching repository metadata so the analysis
//! pipeline can run against the live platform API or a fixed data set.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedSource(Vec<RepositorySnapshot>);
//!
//! #[async_trait]
//! impl RepositorySource for FixedSource {
//!     async fn search_repositories(&self, _query: &str, per_page: u32)
//!         -> Result<Vec<RepositorySnapshot>, SourceError> {
//!         Ok(self.0.iter().take(per_page as usize).cloned().collect())
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::candidate::RepositorySnapshot;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Port for repository metadata lookups.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Searches repositories matching `query`, most-starred first.
    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<RepositorySnapshot>, SourceError>;

    /// Fetches a single repository by owner and name.
    async fn get_repository(&self, owner: &str, repo: &str)
        -> Result<RepositorySnapshot, SourceError>;

    /// Rate-limit state as of the most recent response.
    fn rate_limit(&self) -> RateLimitInfo;
}

/// Remaining request budget reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset: Timestamp,
}

impl RateLimitInfo {
    /// Creates rate limit info from raw header values.
    pub fn new(remaining: u32, reset_unix_secs: i64) -> Self {
        Self {
            remaining,
            reset: Timestamp::from_unix_secs(reset_unix_secs),
        }
    }

    /// Returns true if no requests are left in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Errors from a repository source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Request rejected because the token is missing or invalid.
    #[error("authentication failed")]
    Unauthorized,

    /// Request budget exhausted until `reset`.
    #[error("rate limited until {}", reset.as_datetime())]
    RateLimited {
        /// When the budget resets.
        reset: Timestamp,
    },

    /// Repository does not exist or is not visible.
    #[error("repository not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("API error: {status} {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Status text or response body.
        message: String,
    },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// Creates an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<SourceError> for DomainError {
    fn from(err: SourceError) -> Self {
        let code = match &err {
            SourceError::Unauthorized => ErrorCode::Unauthorized,
            SourceError::RateLimited { .. } => ErrorCode::RateLimited,
            SourceError::NotFound(_) => ErrorCode::RepositoryNotFound,
            SourceError::Http { .. } | SourceError::Network(_) => ErrorCode::SourceUnavailable,
            SourceError::Parse(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_info_from_headers() {
        let info = RateLimitInfo::new(4999, 1705276800);
        assert_eq!(info.remaining, 4999);
        assert_eq!(info.reset.as_unix_secs(), 1705276800);
        assert!(!info.is_exhausted());
    }

    #[test]
    fn rate_limit_info_exhausted_at_zero() {
        assert!(RateLimitInfo::new(0, 0).is_exhausted());
    }

    #[test]
    fn http_error_displays_status_and_message() {
        let err = SourceError::http(422, "Unprocessable Entity");
        assert_eq!(err.to_string(), "API error: 422 Unprocessable Entity");
    }

    #[test]
    fn source_errors_map_to_domain_codes() {
        let cases = [
            (SourceError::Unauthorized, ErrorCode::Unauthorized),
            (
                SourceError::RateLimited {
                    reset: Timestamp::from_unix_secs(0),
                },
                ErrorCode::RateLimited,
            ),
            (SourceError::NotFound("a/b".into()), ErrorCode::RepositoryNotFound),
            (SourceError::http(502, "Bad Gateway"), ErrorCode::SourceUnavailable),
            (SourceError::network("reset"), ErrorCode::SourceUnavailable),
            (SourceError::parse("eof"), ErrorCode::InternalError),
        ];

        for (source, expected) in cases {
            let domain: DomainError = source.into();
            assert_eq!(domain.code, expected);
        }
    }
}
