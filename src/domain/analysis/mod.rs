//! Analysis Module - Fuzzy MADM scoring of candidate batches.
//!
//! # Components
//!
//! - `TriangularFuzzyNumber` - Fuzzy value type (add, component-wise multiply, centroid)
//! - `normalize` / `AttributeRange` - Batch-relative min/max rescaling
//! - `fuzzify` / `RatingLevel` - Five-bucket fuzzification policy
//! - `Criterion` / `CriterionWeights` - The four criteria and their fuzzy weights
//! - `MadmAggregator` - Normalize, fuzzify, weight, defuzzify and rank
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod criteria;
mod fuzzification;
mod fuzzy_number;
mod madm_aggregator;
mod normalizer;

// Re-export all public types
pub use criteria::{Criterion, CriterionWeights};
pub use fuzzification::{fuzzify, RatingLevel};
pub use fuzzy_number::TriangularFuzzyNumber;
pub use madm_aggregator::{
    BatchRanges, CandidateEvaluation, CriterionEvaluation, MadmAggregator, RankedResult,
};
pub use normalizer::{normalize, AttributeRange, NEUTRAL_VALUE};
