//! Analysis run configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::{
    AnalysisConfig, DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_STARS, MAX_PER_PAGE,
};
use crate::domain::analysis::CriterionWeights;

/// Analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// Search queries sent to the repository source, in order
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Number of search results to fetch per query
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Candidates with fewer stars are dropped
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,

    /// Candidates older than this many years are dropped (0 disables)
    #[serde(default)]
    pub max_age_years: u32,

    /// Candidates scored per run, after filtering (0 disables)
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Fuzzy criterion weights
    #[serde(default)]
    pub weights: CriterionWeights,
}

impl AnalysisSettings {
    /// Scoring and filtering parameters for the handler.
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            weights: self.weights,
            min_stars: self.min_stars,
            max_age_years: self.max_age_years,
            max_candidates: self.max_candidates,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.queries.is_empty() || self.queries.iter().any(|q| q.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("ANALYSIS__QUERIES"));
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ValidationError::InvalidPerPage);
        }

        self.weights
            .validate()
            .map_err(|e| ValidationError::InvalidWeights(e.to_string()))
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            per_page: default_per_page(),
            min_stars: default_min_stars(),
            max_age_years: 0,
            max_candidates: default_max_candidates(),
            weights: CriterionWeights::DEFAULT,
        }
    }
}

fn default_queries() -> Vec<String> {
    [
        "framework javascript stars:>1000",
        "framework react vue angular stars:>500",
        "framework web development stars:>1000",
        "framework frontend backend stars:>500",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

fn default_per_page() -> u32 {
    50
}

fn default_min_stars() -> u64 {
    DEFAULT_MIN_STARS
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}
