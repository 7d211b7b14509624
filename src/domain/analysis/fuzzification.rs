//! Fuzzification Policy - maps normalized scalars onto fixed fuzzy ratings.

use serde::{Deserialize, Serialize};

use super::TriangularFuzzyNumber;

/// Linguistic rating bucket for a normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RatingLevel {
    /// All levels in ascending order.
    pub const ALL: [RatingLevel; 5] = [
        RatingLevel::VeryLow,
        RatingLevel::Low,
        RatingLevel::Medium,
        RatingLevel::High,
        RatingLevel::VeryHigh,
    ];

    /// Classifies a normalized value.
    ///
    /// Upper bounds are inclusive and tested in ascending order. Anything
    /// that fails every bound (values above 0.8, and NaN) is `VeryHigh`;
    /// negative values fall into `VeryLow`.
    pub fn classify(normalized: f64) -> Self {
        if normalized <= 0.2 {
            RatingLevel::VeryLow
        } else if normalized <= 0.4 {
            RatingLevel::Low
        } else if normalized <= 0.6 {
            RatingLevel::Medium
        } else if normalized <= 0.8 {
            RatingLevel::High
        } else {
            RatingLevel::VeryHigh
        }
    }

    /// The triangular fuzzy rating for this level.
    pub const fn fuzzy_rating(self) -> TriangularFuzzyNumber {
        match self {
            RatingLevel::VeryLow => TriangularFuzzyNumber::new(0.0, 0.0, 0.3),
            RatingLevel::Low => TriangularFuzzyNumber::new(0.1, 0.3, 0.5),
            RatingLevel::Medium => TriangularFuzzyNumber::new(0.3, 0.5, 0.7),
            RatingLevel::High => TriangularFuzzyNumber::new(0.5, 0.7, 0.9),
            RatingLevel::VeryHigh => TriangularFuzzyNumber::new(0.7, 1.0, 1.0),
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RatingLevel::VeryLow => "Very Low",
            RatingLevel::Low => "Low",
            RatingLevel::Medium => "Medium",
            RatingLevel::High => "High",
            RatingLevel::VeryHigh => "Very High",
        }
    }
}

/// Converts a normalized value into a triangular fuzzy rating.
///
/// This is a step function over five buckets; values between bucket
/// bounds are never interpolated.
pub fn fuzzify(normalized: f64) -> TriangularFuzzyNumber {
    RatingLevel::classify(normalized).fuzzy_rating()
}
