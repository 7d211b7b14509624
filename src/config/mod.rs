//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FRAMEWORK_SCOUT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use framework_scout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Searching {} queries", config.analysis.queries.len());
//! ```

mod analysis;
mod error;
mod github;

pub use analysis::AnalysisSettings;
pub use error::{ConfigError, ValidationError};
pub use github::GitHubConfig;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// (anonymous) configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// GitHub API configuration (token, endpoint, timeout)
    #[serde(default)]
    pub github: GitHubConfig,

    /// Analysis configuration (queries, filters, weights)
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FRAMEWORK_SCOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FRAMEWORK_SCOUT__GITHUB__API_KEY=ghp_...` -> `github.api_key = ...`
    /// - `FRAMEWORK_SCOUT__ANALYSIS__PER_PAGE=50` -> `analysis.per_page = 50`
    /// - `FRAMEWORK_SCOUT__ANALYSIS__QUERIES=web framework,http server` ->
    ///   `analysis.queries = ["web framework", "http server"]`
    /// - `FRAMEWORK_SCOUT__ANALYSIS__WEIGHTS__POPULARITY__LOW=0.2` -> one weight
    ///   component (all twelve components must then be set)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FRAMEWORK_SCOUT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("analysis.queries"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.github.validate()?;
        self.analysis.validate()?;
        EnvFilter::try_new(&self.log_level)
            .map_err(|_| ValidationError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            analysis: AnalysisSettings::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
