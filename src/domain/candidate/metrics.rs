//! Candidate metrics - the four criterion attributes derived from a snapshot.

use serde::{Deserialize, Serialize};

use super::RepositorySnapshot;
use crate::domain::analysis::Criterion;
use crate::domain::foundation::Timestamp;

/// Star count at which popularity saturates.
pub const POPULARITY_SATURATION_STARS: f64 = 100_000.0;

/// Forks plus watchers at which community saturates.
pub const COMMUNITY_SATURATION: f64 = 50_000.0;

/// Days without an update after which maintenance reaches zero.
pub const MAINTENANCE_HORIZON_DAYS: f64 = 365.0;

/// Age in days at which a repository counts as fully mature.
pub const MATURITY_HORIZON_DAYS: f64 = 365.0 * 5.0;

/// One evaluated candidate.
///
/// The identity and display fields are carried through scoring untouched.
/// The four criterion attributes are typically in `[0, 1]` but are not
/// clamped here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetrics {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub issues: u64,
    pub watchers: u64,
    pub last_update: Timestamp,
    pub created: Timestamp,
    pub language: String,
    pub size: u64,
    pub url: String,
    pub days_since_update: i64,
    pub age_days: i64,

    pub popularity: f64,
    pub community: f64,
    pub maintenance: f64,
    pub maturity: f64,
}

impl CandidateMetrics {
    /// Derives candidate metrics from a snapshot, relative to `now`.
    ///
    /// - popularity: stars / 100k, capped at 1
    /// - community: (forks + watchers) / 50k, capped at 1
    /// - maintenance: 1 - days since update / 365, floored at 0
    /// - maturity: age in days / (5 * 365), capped at 1
    pub fn from_snapshot(snapshot: &RepositorySnapshot, now: Timestamp) -> Self {
        let days_since_update = now.whole_days_since(&snapshot.updated_at);
        let age_days = now.whole_days_since(&snapshot.created_at);

        let popularity = (snapshot.stargazers_count as f64 / POPULARITY_SATURATION_STARS).min(1.0);
        let community = ((snapshot.forks_count + snapshot.watchers_count) as f64
            / COMMUNITY_SATURATION)
            .min(1.0);
        let maintenance = (1.0 - days_since_update as f64 / MAINTENANCE_HORIZON_DAYS).max(0.0);
        let maturity = (age_days as f64 / MATURITY_HORIZON_DAYS).min(1.0);

        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            full_name: snapshot.full_name.clone(),
            description: snapshot.description.clone().unwrap_or_default(),
            stars: snapshot.stargazers_count,
            forks: snapshot.forks_count,
            issues: snapshot.open_issues_count,
            watchers: snapshot.watchers_count,
            last_update: snapshot.updated_at,
            created: snapshot.created_at,
            language: snapshot
                .language
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            size: snapshot.size,
            url: snapshot.html_url.clone(),
            days_since_update,
            age_days,
            popularity,
            community,
            maintenance,
            maturity,
        }
    }

    /// Creates a candidate with only a name and the four attributes set.
    ///
    /// Identity fields other than `name`/`full_name` are zeroed.
    pub fn from_attributes(
        name: impl Into<String>,
        popularity: f64,
        community: f64,
        maintenance: f64,
        maturity: f64,
    ) -> Self {
        let name = name.into();
        let epoch = Timestamp::from_unix_secs(0);
        Self {
            id: 0,
            full_name: name.clone(),
            name,
            description: String::new(),
            stars: 0,
            forks: 0,
            issues: 0,
            watchers: 0,
            last_update: epoch,
            created: epoch,
            language: "Unknown".to_string(),
            size: 0,
            url: String::new(),
            days_since_update: 0,
            age_days: 0,
            popularity,
            community,
            maintenance,
            maturity,
        }
    }

    /// Returns the raw attribute value for a criterion.
    pub fn attribute(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Popularity => self.popularity,
            Criterion::Community => self.community,
            Criterion::Maintenance => self.maintenance,
            Criterion::Maturity => self.maturity,
        }
    }
}
