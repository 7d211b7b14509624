//! RunAnalysisHandler - Fetches candidate repositories and ranks them.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::analysis::{CriterionWeights, MadmAggregator, RankedResult};
use crate::domain::candidate::{CandidateMetrics, RepositorySnapshot};
use crate::domain::foundation::{DomainError, Timestamp, ValidationError};
use crate::ports::{RateLimitInfo, RepositorySource};

/// Largest page size the search endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Star threshold applied unless configured otherwise.
pub const DEFAULT_MIN_STARS: u64 = 100;

/// Number of candidates scored per run unless configured otherwise.
pub const DEFAULT_MAX_CANDIDATES: usize = 50;

const DAYS_PER_YEAR: i64 = 365;

/// Scoring and filtering parameters for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub weights: CriterionWeights,
    /// Candidates with fewer stars are dropped before scoring.
    pub min_stars: u64,
    /// Candidates older than this many years are dropped. `0` disables the filter.
    pub max_age_years: u32,
    /// At most this many candidates survive filtering, in fetch order. `0` disables the cap.
    pub max_candidates: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::DEFAULT,
            min_stars: DEFAULT_MIN_STARS,
            max_age_years: 0,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Command to run an analysis over one or more search queries.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    /// Searched in order; results are merged and deduplicated by repository id.
    pub queries: Vec<String>,
    /// Results requested per query.
    pub per_page: u32,
    pub config: AnalysisConfig,
}

/// Ranked outcome of an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub queries: Vec<String>,
    /// Distinct repositories returned by the source, before filtering.
    pub candidates_fetched: usize,
    /// Repositories returned more than once and dropped.
    pub duplicates_removed: usize,
    pub results: Vec<RankedResult>,
    pub rate_limit: RateLimitInfo,
    pub analyzed_at: Timestamp,
}

/// Handler for analysis runs.
pub struct RunAnalysisHandler {
    source: Arc<dyn RepositorySource>,
}

impl RunAnalysisHandler {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self { source }
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<AnalysisReport, DomainError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Runs the analysis with metrics derived relative to `now`.
    pub async fn handle_at(
        &self,
        cmd: RunAnalysisCommand,
        now: Timestamp,
    ) -> Result<AnalysisReport, DomainError> {
        // 1. Validate
        validate_command(&cmd)?;

        // 2. Fetch every query, keeping the first occurrence of each repository
        let mut fetched = Vec::new();
        for query in &cmd.queries {
            let snapshots = self
                .source
                .search_repositories(query.trim(), cmd.per_page)
                .await?;
            debug!(query = %query, fetched = snapshots.len(), "Fetched repositories");
            fetched.extend(snapshots);
        }
        let total = fetched.len();
        let snapshots = dedupe_by_id(fetched);
        let candidates_fetched = snapshots.len();
        let duplicates_removed = total - candidates_fetched;

        // 3. Derive, filter and cap
        let candidates = prepare_candidates(&snapshots, &cmd.config, now);
        debug!(
            unique = candidates_fetched,
            duplicates = duplicates_removed,
            kept = candidates.len(),
            "Filtered candidates"
        );

        // 4. Score
        let results = MadmAggregator::score(&candidates, &cmd.config.weights);

        if let Some(top) = results.first() {
            info!(
                queries = cmd.queries.len(),
                ranked = results.len(),
                top = %top.candidate.full_name,
                top_score = top.score,
                "Analysis complete"
            );
        } else {
            info!(queries = cmd.queries.len(), "Analysis complete with no candidates");
        }

        Ok(AnalysisReport {
            queries: cmd.queries,
            candidates_fetched,
            duplicates_removed,
            results,
            rate_limit: self.source.rate_limit(),
            analyzed_at: now,
        })
    }
}

fn validate_command(cmd: &RunAnalysisCommand) -> Result<(), ValidationError> {
    if cmd.queries.is_empty() || cmd.queries.iter().any(|q| q.trim().is_empty()) {
        return Err(ValidationError::empty_field("queries"));
    }
    if cmd.per_page == 0 || cmd.per_page > MAX_PER_PAGE {
        return Err(ValidationError::out_of_range(
            "per_page",
            1,
            MAX_PER_PAGE as i64,
            cmd.per_page as i64,
        ));
    }
    cmd.config.weights.validate()
}

/// Drops repositories already seen earlier in the list, by id.
fn dedupe_by_id(snapshots: Vec<RepositorySnapshot>) -> Vec<RepositorySnapshot> {
    let mut seen = HashSet::with_capacity(snapshots.len());
    snapshots
        .into_iter()
        .filter(|s| seen.insert(s.id))
        .collect()
}

/// Derives candidate metrics, drops repositories outside the configured
/// star and age thresholds, then applies the candidate cap. Input order is
/// preserved.
pub fn prepare_candidates(
    snapshots: &[RepositorySnapshot],
    config: &AnalysisConfig,
    now: Timestamp,
) -> Vec<CandidateMetrics> {
    let max_age_days = i64::from(config.max_age_years) * DAYS_PER_YEAR;
    let cap = match config.max_candidates {
        0 => usize::MAX,
        n => n,
    };

    snapshots
        .iter()
        .filter(|s| s.stargazers_count >= config.min_stars)
        .map(|s| CandidateMetrics::from_snapshot(s, now))
        .filter(|c| config.max_age_years == 0 || c.age_days <= max_age_days)
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySource;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::SourceError;

    const NOW: i64 = 1_705_276_800; // 2024-01-15

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(NOW)
    }

    fn snapshot(full_name: &str, stars: u64, age_days: i64, stale_days: i64) -> RepositorySnapshot {
        let name = full_name.split('/').nth(1).unwrap_or(full_name);
        RepositorySnapshot {
            id: stars,
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: Some("A web framework".to_string()),
            stargazers_count: stars,
            forks_count: stars / 10,
            open_issues_count: 5,
            watchers_count: stars,
            updated_at: now().minus_days(stale_days),
            created_at: now().minus_days(age_days),
            language: Some("Rust".to_string()),
            size: 1024,
            default_branch: "main".to_string(),
            html_url: format!("https://github.com/{}", full_name),
        }
    }

    fn fixture() -> Vec<RepositorySnapshot> {
        vec![
            snapshot("tokio-rs/axum", 18_000, 2_000, 1),
            snapshot("actix/actix-web", 20_000, 2_500, 3),
            snapshot("small/framework", 50, 100, 10),
            snapshot("old/framework", 5_000, 4_000, 300),
        ]
    }

    fn unfiltered() -> AnalysisConfig {
        AnalysisConfig {
            min_stars: 0,
            max_candidates: 0,
            ..AnalysisConfig::default()
        }
    }

    fn command(query: &str, per_page: u32) -> RunAnalysisCommand {
        multi_command(&[query], per_page)
    }

    fn multi_command(queries: &[&str], per_page: u32) -> RunAnalysisCommand {
        RunAnalysisCommand {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            per_page,
            config: unfiltered(),
        }
    }

    fn handler(source: InMemorySource) -> RunAnalysisHandler {
        RunAnalysisHandler::new(Arc::new(source))
    }

    #[tokio::test]
    async fn ranks_all_fetched_candidates() {
        let report = handler(InMemorySource::new(fixture()))
            .handle_at(command("framework", 30), now())
            .await
            .unwrap();

        assert_eq!(report.candidates_fetched, 4);
        assert_eq!(report.duplicates_removed, 0);
        assert_eq!(report.results.len(), 4);
        let ranks: Vec<_> = report.results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(report
            .results
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
        assert_eq!(report.analyzed_at, now());
    }

    #[tokio::test]
    async fn filters_by_min_stars_and_age() {
        let mut cmd = command("framework", 30);
        cmd.config.min_stars = 100;
        cmd.config.max_age_years = 8;

        let report = handler(InMemorySource::new(fixture()))
            .handle_at(cmd, now())
            .await
            .unwrap();

        assert_eq!(report.candidates_fetched, 4);
        let names: Vec<_> = report
            .results
            .iter()
            .map(|r| r.candidate.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["actix/actix-web", "tokio-rs/axum"]);
    }

    #[tokio::test]
    async fn overlapping_queries_are_deduplicated_by_id() {
        let source = Arc::new(InMemorySource::new(fixture()));
        let handler = RunAnalysisHandler::new(source.clone());

        let report = handler
            .handle_at(multi_command(&["actix", "framework", "axum"], 30), now())
            .await
            .unwrap();

        assert_eq!(source.call_count(), 3);
        assert_eq!(report.queries, vec!["actix", "framework", "axum"]);
        assert_eq!(report.candidates_fetched, 4);
        assert_eq!(report.duplicates_removed, 2);
        let mut names: Vec<_> = report
            .results
            .iter()
            .map(|r| r.candidate.full_name.as_str())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["actix/actix-web", "old/framework", "small/framework", "tokio-rs/axum"]
        );
    }

    #[tokio::test]
    async fn candidate_cap_applies_after_filters() {
        let mut cmd = command("framework", 30);
        cmd.config.min_stars = 100;
        cmd.config.max_candidates = 2;

        let report = handler(InMemorySource::new(fixture()))
            .handle_at(cmd, now())
            .await
            .unwrap();

        // Search order is by stars: actix, axum, old, small. `small` is
        // filtered out and `old` falls past the cap.
        assert_eq!(report.candidates_fetched, 4);
        let names: Vec<_> = report
            .results
            .iter()
            .map(|r| r.candidate.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["actix/actix-web", "tokio-rs/axum"]);
    }

    #[test]
    fn default_config_keeps_fifty_candidates_over_a_hundred_stars() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_stars, 100);
        assert_eq!(config.max_candidates, 50);

        let snapshots: Vec<_> = (0..60)
            .map(|i| {
                let mut s = snapshot(&format!("org/repo-{}", i), 1_000 + i, 500, 1);
                s.id = i;
                s
            })
            .chain(std::iter::once(snapshot("org/tiny", 99, 500, 1)))
            .collect();

        let candidates = prepare_candidates(&snapshots, &config, now());

        assert_eq!(candidates.len(), 50);
        assert_eq!(candidates[0].full_name, "org/repo-0");
        assert_eq!(candidates[49].full_name, "org/repo-49");
    }

    #[test]
    fn dedupe_by_id_keeps_first_occurrence() {
        let mut renamed = snapshot("axum/renamed", 18_000, 10, 1);
        renamed.description = Some("second copy".to_string());
        let snapshots = vec![
            snapshot("tokio-rs/axum", 18_000, 2_000, 1),
            snapshot("actix/actix-web", 20_000, 2_500, 3),
            renamed,
        ];

        let unique = dedupe_by_id(snapshots);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].full_name, "tokio-rs/axum");
        assert_eq!(unique[1].full_name, "actix/actix-web");
    }

    #[tokio::test]
    async fn rejects_empty_query_list() {
        let err = handler(InMemorySource::new(fixture()))
            .handle_at(multi_command(&[], 30), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn empty_search_yields_empty_report() {
        let report = handler(InMemorySource::new(fixture()))
            .handle_at(command("nothing-matches-this", 30), now())
            .await
            .unwrap();

        assert_eq!(report.candidates_fetched, 0);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_query_without_calling_source() {
        let source = Arc::new(InMemorySource::new(fixture()));
        let handler = RunAnalysisHandler::new(source.clone());

        let err = handler
            .handle_at(multi_command(&["framework", "   "], 30), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn rejects_per_page_out_of_range() {
        let handler = handler(InMemorySource::new(fixture()));

        for per_page in [0, 101] {
            let err = handler
                .handle_at(command("framework", per_page), now())
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::OutOfRange);
        }
    }

    #[tokio::test]
    async fn rejects_unordered_weights() {
        let mut cmd = command("framework", 30);
        cmd.config.weights.popularity.low = 0.9;

        let err = handler(InMemorySource::new(fixture()))
            .handle_at(cmd, now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn source_failure_propagates() {
        let err = handler(InMemorySource::failing(SourceError::Unauthorized))
            .handle_at(command("framework", 30), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn prepare_candidates_keeps_input_order() {
        let config = unfiltered();
        let candidates = prepare_candidates(&fixture(), &config, now());

        let names: Vec<_> = candidates.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["tokio-rs/axum", "actix/actix-web", "small/framework", "old/framework"]
        );
        assert_eq!(candidates[0].age_days, 2_000);
        assert_eq!(candidates[0].days_since_update, 1);
    }

    #[test]
    fn prepare_candidates_age_filter_boundary() {
        let config = AnalysisConfig {
            max_age_years: 1,
            ..unfiltered()
        };
        let snapshots = vec![
            snapshot("a/exactly-one-year", 10, 365, 0),
            snapshot("b/one-year-and-a-day", 10, 366, 0),
        ];

        let candidates = prepare_candidates(&snapshots, &config, now());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].full_name, "a/exactly-one-year");
    }
}
