//! Triangular fuzzy numbers and the arithmetic used to combine ratings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A triangular fuzzy number `(low, mid, high)`.
///
/// The three components are the pessimistic, most likely and optimistic
/// estimates of an uncertain quantity. `low <= mid <= high` is intended
/// but not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangularFuzzyNumber {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl TriangularFuzzyNumber {
    /// Additive identity `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a fuzzy number from its three components.
    pub const fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Component-wise sum.
    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.low + other.low,
            self.mid + other.mid,
            self.high + other.high,
        )
    }

    /// Component-wise product.
    ///
    /// This is not the interval-correct product of two triangular numbers
    /// (which is generally not triangular). Ratings are always combined with
    /// this approximation so scores stay comparable between runs.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(
            self.low * other.low,
            self.mid * other.mid,
            self.high * other.high,
        )
    }

    /// Centroid defuzzification: the mean of the three components.
    pub fn defuzzify(self) -> f64 {
        (self.low + self.mid + self.high) / 3.0
    }

    /// Returns true if `low <= mid <= high`.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.mid && self.mid <= self.high
    }
}

impl Add for TriangularFuzzyNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        TriangularFuzzyNumber::add(self, rhs)
    }
}

impl Mul for TriangularFuzzyNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Sum for TriangularFuzzyNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, TriangularFuzzyNumber::add)
    }
}

impl fmt::Display for TriangularFuzzyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.low, self.mid, self.high)
    }
}
