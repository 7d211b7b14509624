//! Metric Normalizer - batch-relative min/max rescaling.
//!
//! Scores produced from normalized values are only comparable inside the
//! batch they were computed for. Adding or removing a candidate can move
//! every other candidate's normalized value.

use serde::{Deserialize, Serialize};

/// Value returned when every candidate in the batch ties on an attribute.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Rescales `value` into `[0, 1]` relative to `min` and `max`.
///
/// Returns [`NEUTRAL_VALUE`] when `min == max`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return NEUTRAL_VALUE;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Minimum and maximum of one attribute across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub min: f64,
    pub max: f64,
}

impl AttributeRange {
    /// Computes the range of `values`, or `None` for an empty batch.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;

        let range = iter.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, v| Self {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        );

        Some(range)
    }

    /// Normalizes `value` against this range.
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    /// Returns true if every value in the batch was identical.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}
