//! GitHub Source - Implementation of RepositorySource for the GitHub REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GitHubSourceConfig::new()
//!     .with_api_key(token)
//!     .with_base_url("https://api.github.com");
//!
//! let source = GitHubSource::new(config)?;
//! ```
//!
//! Requests are sent once; retry and backoff are left to the caller.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::time::Duration;

use crate::domain::candidate::RepositorySnapshot;
use crate::ports::{RateLimitInfo, RepositorySource, SourceError};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = "Fuzzy-MADM-Framework-Analyzer";

/// Media type for the v3 REST API.
const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Budget assumed before the first response arrives.
const INITIAL_RATE_LIMIT: u32 = 5000;

/// Remaining requests below which each response logs a warning.
const RATE_LIMIT_WARNING_THRESHOLD: u32 = 10;

/// Configuration for the GitHub source.
#[derive(Debug, Clone)]
pub struct GitHubSourceConfig {
    /// Personal access token. Anonymous requests when `None`.
    api_key: Option<Secret<String>>,
    /// API root (default: https://api.github.com).
    pub base_url: String,
    /// `User-Agent` header, required by the API.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GitHubSourceConfig {
    /// Creates an anonymous configuration with default endpoints.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API token. Empty tokens are ignored.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.is_empty() {
            None
        } else {
            Some(Secret::new(key))
        };
        self
    }

    /// Sets the API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true if a token is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn authorization(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| format!("token {}", key.expose_secret()))
    }
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// GitHub REST API repository source.
pub struct GitHubSource {
    config: GitHubSourceConfig,
    client: Client,
    rate_limit_remaining: AtomicU32,
    rate_limit_reset: AtomicI64,
}

impl GitHubSource {
    /// Creates a new GitHub source with the given configuration.
    pub fn new(config: GitHubSourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            rate_limit_remaining: AtomicU32::new(INITIAL_RATE_LIMIT),
            rate_limit_reset: AtomicI64::new(0),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/repositories", self.config.base_url)
    }

    fn repository_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.config.base_url, owner, repo)
    }

    /// Adds the headers every request carries.
    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, GITHUB_V3_MEDIA_TYPE)
            .header(USER_AGENT, &self.config.user_agent);

        match self.config.authorization() {
            Some(auth) => request.header(AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Sends a request, records rate-limit headers and maps error statuses.
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, SourceError> {
        let response = self.with_headers(request).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::network(format!(
                    "Request timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                SourceError::network(format!("Connection failed: {}", e))
            } else {
                SourceError::network(e.to_string())
            }
        })?;

        match parse_rate_limit(response.headers()) {
            Some(rate_limit) => {
                self.rate_limit_remaining
                    .store(rate_limit.remaining, Ordering::Relaxed);
                self.rate_limit_reset
                    .store(rate_limit.reset.as_unix_secs(), Ordering::Relaxed);

                if rate_limit.remaining < RATE_LIMIT_WARNING_THRESHOLD {
                    tracing::warn!(
                        remaining = rate_limit.remaining,
                        reset = %rate_limit.reset.as_datetime(),
                        "GitHub rate limit nearly exhausted"
                    );
                }
            }
            None => tracing::debug!("Response carried no rate-limit headers"),
        }

        check_status(response.status(), self.rate_limit(), resource)?;
        Ok(response)
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<RepositorySnapshot>, SourceError> {
        tracing::debug!(query, per_page, "Searching GitHub repositories");

        let per_page = per_page.to_string();
        let request = self.client.get(self.search_url()).query(&[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
            ("per_page", per_page.as_str()),
        ]);

        let response = self.send(request, query).await?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("Failed to parse search response: {}", e)))?;

        tracing::debug!(count = body.items.len(), "GitHub search returned");
        Ok(body.items)
    }

    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositorySnapshot, SourceError> {
        let full_name = format!("{}/{}", owner, repo);
        tracing::debug!(repository = %full_name, "Fetching GitHub repository");

        let request = self.client.get(self.repository_url(owner, repo));
        let response = self.send(request, &full_name).await?;

        response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("Failed to parse repository: {}", e)))
    }

    fn rate_limit(&self) -> RateLimitInfo {
        RateLimitInfo::new(
            self.rate_limit_remaining.load(Ordering::Relaxed),
            self.rate_limit_reset.load(Ordering::Relaxed),
        )
    }
}

/// Reads rate-limit headers.
///
/// Returns `None` when the remaining-requests header is absent. A malformed
/// value, or a missing reset header alongside it, counts as 0.
fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
    fn header_value<T: std::str::FromStr + Default>(headers: &HeaderMap, name: &str) -> T {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    if !headers.contains_key(RATE_LIMIT_REMAINING_HEADER) {
        return None;
    }

    Some(RateLimitInfo::new(
        header_value(headers, RATE_LIMIT_REMAINING_HEADER),
        header_value(headers, RATE_LIMIT_RESET_HEADER),
    ))
}

/// Maps a response status to an error, if it is not a success.
fn check_status(
    status: StatusCode,
    rate_limit: RateLimitInfo,
    resource: &str,
) -> Result<(), SourceError> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(SourceError::Unauthorized),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate_limit.is_exhausted() => {
            Err(SourceError::RateLimited {
                reset: rate_limit.reset,
            })
        }
        StatusCode::NOT_FOUND => Err(SourceError::NotFound(resource.to_string())),
        _ => Err(SourceError::http(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        )),
    }
}

// ----- GitHub API Types -----

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositorySnapshot>,
}
