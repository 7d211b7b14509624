//! MADM Aggregator - fuzzy multi-attribute scoring and ranking.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{
    fuzzify, AttributeRange, Criterion, CriterionWeights, RatingLevel, TriangularFuzzyNumber,
};
use crate::domain::candidate::CandidateMetrics;
use crate::domain::foundation::ValidationError;

/// How one criterion contributed to a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub criterion: Criterion,
    /// Batch-relative normalized attribute value.
    pub normalized: f64,
    pub level: RatingLevel,
    /// Fuzzy rating for `normalized`.
    pub rating: TriangularFuzzyNumber,
    /// `weight * rating`.
    pub weighted: TriangularFuzzyNumber,
}

/// Aggregated evaluation of a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    /// Per-criterion contributions, in aggregation order.
    pub breakdown: Vec<CriterionEvaluation>,
    pub fuzzy_score: TriangularFuzzyNumber,
    pub score: f64,
}

/// A scored and ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub candidate: CandidateMetrics,
    /// Defuzzified score.
    pub score: f64,
    pub fuzzy_score: TriangularFuzzyNumber,
    /// 1-based position after sorting by score descending. 0 until ranked.
    pub rank: usize,
    pub breakdown: Vec<CriterionEvaluation>,
}

/// Per-criterion min/max over a candidate batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRanges {
    pub popularity: AttributeRange,
    pub community: AttributeRange,
    pub maintenance: AttributeRange,
    pub maturity: AttributeRange,
}

impl BatchRanges {
    /// Computes the ranges for a batch, or `None` if the batch is empty.
    pub fn of(candidates: &[CandidateMetrics]) -> Option<Self> {
        let range = |criterion: Criterion| {
            AttributeRange::of(candidates.iter().map(|c| c.attribute(criterion)))
        };

        Some(Self {
            popularity: range(Criterion::Popularity)?,
            community: range(Criterion::Community)?,
            maintenance: range(Criterion::Maintenance)?,
            maturity: range(Criterion::Maturity)?,
        })
    }

    /// Returns the range for a criterion.
    pub fn get(&self, criterion: Criterion) -> AttributeRange {
        match criterion {
            Criterion::Popularity => self.popularity,
            Criterion::Community => self.community,
            Criterion::Maintenance => self.maintenance,
            Criterion::Maturity => self.maturity,
        }
    }
}

/// Fuzzy MADM scoring functions.
pub struct MadmAggregator;

impl MadmAggregator {
    /// Scores and ranks a candidate batch.
    ///
    /// # Algorithm
    /// For each candidate and criterion: normalize against the batch range,
    /// fuzzify, multiply by the criterion weight. The fuzzy score is the sum
    /// over criteria (popularity, community, maintenance, maturity) and the
    /// scalar score is its centroid. Results are sorted by score descending
    /// and ranked 1..N.
    ///
    /// # Edge Cases
    /// - Empty batch: Returns an empty Vec
    /// - Attribute identical across the batch: normalizes to 0.5
    /// - Equal scores: Original relative order preserved
    ///
    /// Weights are not checked here. Non-finite weights produce NaN scores,
    /// which rank as ties; use [`MadmAggregator::try_score`] for unvalidated
    /// weights.
    pub fn score(candidates: &[CandidateMetrics], weights: &CriterionWeights) -> Vec<RankedResult> {
        let Some(ranges) = BatchRanges::of(candidates) else {
            return Vec::new();
        };

        let results = candidates
            .iter()
            .map(|candidate| {
                let evaluation = Self::evaluate(candidate, &ranges, weights);
                RankedResult {
                    candidate: candidate.clone(),
                    score: evaluation.score,
                    fuzzy_score: evaluation.fuzzy_score,
                    rank: 0,
                    breakdown: evaluation.breakdown,
                }
            })
            .collect();

        Self::rank(results)
    }

    /// Validates `weights`, then scores and ranks the batch.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` naming the first criterion
    /// whose weight is non-finite or not ordered `low <= mid <= high`.
    pub fn try_score(
        candidates: &[CandidateMetrics],
        weights: &CriterionWeights,
    ) -> Result<Vec<RankedResult>, ValidationError> {
        weights.validate()?;
        Ok(Self::score(candidates, weights))
    }

    /// Evaluates one candidate against precomputed batch ranges.
    pub fn evaluate(
        candidate: &CandidateMetrics,
        ranges: &BatchRanges,
        weights: &CriterionWeights,
    ) -> CandidateEvaluation {
        let breakdown: Vec<CriterionEvaluation> = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let normalized = ranges.get(criterion).normalize(candidate.attribute(criterion));
                let rating = fuzzify(normalized);
                CriterionEvaluation {
                    criterion,
                    normalized,
                    level: RatingLevel::classify(normalized),
                    rating,
                    weighted: weights.get(criterion).multiply(rating),
                }
            })
            .collect();

        let fuzzy_score: TriangularFuzzyNumber = breakdown.iter().map(|e| e.weighted).sum();

        CandidateEvaluation {
            breakdown,
            fuzzy_score,
            score: fuzzy_score.defuzzify(),
        }
    }

    /// Sorts by score descending (stable) and assigns ranks 1..N.
    pub fn rank(mut results: Vec<RankedResult>) -> Vec<RankedResult> {
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        for (index, result) in results.iter_mut().enumerate() {
            result.rank = index + 1;
        }
        results
    }
}
