//! In-memory repository source for tests and offline runs.
//!
//! Search matches the query against name, full name and description
//! (case-insensitive) and returns results most-starred first, mirroring the
//! ordering of the live search endpoint.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::candidate::RepositorySnapshot;
use crate::ports::{RateLimitInfo, RepositorySource, SourceError};

/// Repository source backed by a fixed list of snapshots.
#[derive(Debug, Default)]
pub struct InMemorySource {
    repositories: Vec<RepositorySnapshot>,
    failure: Option<SourceError>,
    calls: AtomicUsize,
}

impl InMemorySource {
    /// Creates a source serving the given snapshots.
    pub fn new(repositories: Vec<RepositorySnapshot>) -> Self {
        Self {
            repositories,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source whose every call fails with `error`.
    pub fn failing(error: SourceError) -> Self {
        Self {
            repositories: Vec::new(),
            failure: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls made against this source.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> Result<(), SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn matches(repository: &RepositorySnapshot, needle: &str) -> bool {
        needle.is_empty()
            || repository.name.to_lowercase().contains(needle)
            || repository.full_name.to_lowercase().contains(needle)
            || repository
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

#[async_trait]
impl RepositorySource for InMemorySource {
    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<RepositorySnapshot>, SourceError> {
        self.begin_call()?;

        let needle = query.trim().to_lowercase();
        let mut found: Vec<RepositorySnapshot> = self
            .repositories
            .iter()
            .filter(|r| Self::matches(r, &needle))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        found.truncate(per_page as usize);
        Ok(found)
    }

    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositorySnapshot, SourceError> {
        self.begin_call()?;

        let full_name = format!("{}/{}", owner, repo);
        self.repositories
            .iter()
            .find(|r| r.full_name.eq_ignore_ascii_case(&full_name))
            .cloned()
            .ok_or(SourceError::NotFound(full_name))
    }

    fn rate_limit(&self) -> RateLimitInfo {
        RateLimitInfo::new(u32::MAX, 0)
    }
}
