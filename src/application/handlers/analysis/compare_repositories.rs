//! CompareRepositoriesHandler - Ranks an explicit list of repositories.

use std::sync::Arc;

use tracing::{debug, info};

use super::AnalysisReport;
use crate::domain::analysis::{CriterionWeights, MadmAggregator};
use crate::domain::candidate::CandidateMetrics;
use crate::domain::foundation::{DomainError, Timestamp, ValidationError};
use crate::ports::RepositorySource;

/// Command to rank named repositories against each other.
#[derive(Debug, Clone)]
pub struct CompareRepositoriesCommand {
    /// Repositories as `owner/repo`.
    pub repositories: Vec<String>,
    pub weights: CriterionWeights,
}

/// Handler for head-to-head comparisons.
///
/// No star or age filter is applied: every named repository is ranked.
pub struct CompareRepositoriesHandler {
    source: Arc<dyn RepositorySource>,
}

impl CompareRepositoriesHandler {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self { source }
    }

    pub async fn handle(
        &self,
        cmd: CompareRepositoriesCommand,
    ) -> Result<AnalysisReport, DomainError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    pub async fn handle_at(
        &self,
        cmd: CompareRepositoriesCommand,
        now: Timestamp,
    ) -> Result<AnalysisReport, DomainError> {
        cmd.weights.validate()?;
        let names = parse_names(&cmd.repositories)?;

        let mut candidates = Vec::with_capacity(names.len());
        for (owner, repo) in &names {
            let snapshot = self.source.get_repository(owner, repo).await?;
            debug!(
                repository = %snapshot.full_name,
                stars = snapshot.stargazers_count,
                "Fetched repository"
            );
            candidates.push(CandidateMetrics::from_snapshot(&snapshot, now));
        }

        let results = MadmAggregator::score(&candidates, &cmd.weights);
        info!(compared = results.len(), "Comparison complete");

        Ok(AnalysisReport {
            candidates_fetched: candidates.len(),
            duplicates_removed: cmd.repositories.len() - names.len(),
            queries: cmd.repositories,
            results,
            rate_limit: self.source.rate_limit(),
            analyzed_at: now,
        })
    }
}

/// Splits `owner/repo` names, dropping case-insensitive duplicates.
fn parse_names(repositories: &[String]) -> Result<Vec<(String, String)>, ValidationError> {
    if repositories.is_empty() {
        return Err(ValidationError::empty_field("repositories"));
    }

    let mut names: Vec<(String, String)> = Vec::with_capacity(repositories.len());
    for raw in repositories {
        let (owner, repo) = raw
            .trim()
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
            .ok_or_else(|| {
                ValidationError::invalid_format("repositories", format!("'{}' is not owner/repo", raw))
            })?;

        let duplicate = names
            .iter()
            .any(|(o, r)| o.eq_ignore_ascii_case(owner) && r.eq_ignore_ascii_case(repo));
        if !duplicate {
            names.push((owner.to_string(), repo.to_string()));
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySource;
    use crate::domain::candidate::RepositorySnapshot;
    use crate::domain::foundation::ErrorCode;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_705_276_800)
    }

    fn snapshot(full_name: &str, stars: u64) -> RepositorySnapshot {
        let name = full_name.split('/').nth(1).unwrap_or(full_name);
        RepositorySnapshot {
            id: stars,
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: None,
            stargazers_count: stars,
            forks_count: stars / 5,
            open_issues_count: 0,
            watchers_count: stars,
            updated_at: now().minus_days(2),
            created_at: now().minus_days(1_000),
            language: None,
            size: 0,
            default_branch: "main".to_string(),
            html_url: format!("https://github.com/{}", full_name),
        }
    }

    fn source() -> Arc<InMemorySource> {
        Arc::new(InMemorySource::new(vec![
            snapshot("vuejs/core", 45_000),
            snapshot("sveltejs/svelte", 78_000),
            snapshot("angular/angular", 94_000),
        ]))
    }

    fn command(names: &[&str]) -> CompareRepositoriesCommand {
        CompareRepositoriesCommand {
            repositories: names.iter().map(|n| n.to_string()).collect(),
            weights: CriterionWeights::DEFAULT,
        }
    }

    #[tokio::test]
    async fn ranks_named_repositories() {
        let handler = CompareRepositoriesHandler::new(source());

        let report = handler
            .handle_at(command(&["vuejs/core", "angular/angular"]), now())
            .await
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].candidate.full_name, "angular/angular");
        assert_eq!(report.results[0].rank, 1);
        assert_eq!(report.results[1].candidate.language, "Unknown");
    }

    #[tokio::test]
    async fn duplicate_names_are_fetched_once() {
        let source = source();
        let handler = CompareRepositoriesHandler::new(source.clone());

        let report = handler
            .handle_at(command(&["vuejs/core", "VueJS/Core", "sveltejs/svelte"]), now())
            .await
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn unknown_repository_is_not_found() {
        let handler = CompareRepositoriesHandler::new(source());

        let err = handler
            .handle_at(command(&["vuejs/core", "nobody/nothing"]), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RepositoryNotFound);
    }

    #[tokio::test]
    async fn malformed_name_is_rejected() {
        let handler = CompareRepositoriesHandler::new(source());

        for bad in ["vuejs", "/core", "vuejs/", "a/b/c"] {
            let err = handler.handle_at(command(&[bad]), now()).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat, "{}", bad);
        }
    }

    #[tokio::test]
    async fn empty_list_is_rejected() {
        let handler = CompareRepositoriesHandler::new(source());

        let err = handler.handle_at(command(&[]), now()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyField);
    }
}
