//! GitHub API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::github::{GitHubSourceConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Upper bound on the request timeout.
const MAX_TIMEOUT_SECS: u64 = 300;

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Personal access token (optional; anonymous requests have a lower rate limit)
    pub api_key: Option<Secret<String>>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GitHubConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a token is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Builds the adapter configuration.
    pub fn to_source_config(&self) -> GitHubSourceConfig {
        let mut source = GitHubSourceConfig::new()
            .with_base_url(self.base_url.as_str())
            .with_user_agent(self.user_agent.as_str())
            .with_timeout(self.timeout());

        if let Some(key) = &self.api_key {
            source = source.with_api_key(key.expose_secret().as_str());
        }
        source
    }

    /// Validate GitHub configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        if self.user_agent.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GITHUB__USER_AGENT"));
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    30
}
