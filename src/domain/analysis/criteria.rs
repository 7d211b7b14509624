//! Evaluation criteria and their fuzzy weights.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::TriangularFuzzyNumber;
use crate::domain::foundation::ValidationError;

/// One of the four fixed evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Popularity,
    Community,
    Maintenance,
    Maturity,
}

impl Criterion {
    /// All criteria, in aggregation order.
    pub const ALL: [Criterion; 4] = [
        Criterion::Popularity,
        Criterion::Community,
        Criterion::Maintenance,
        Criterion::Maturity,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Popularity => "popularity",
            Criterion::Community => "community",
            Criterion::Maintenance => "maintenance",
            Criterion::Maturity => "maturity",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::unknown_criterion(s))
    }
}

/// Fuzzy weight per criterion. Constant for a whole scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriterionWeights {
    pub popularity: TriangularFuzzyNumber,
    pub community: TriangularFuzzyNumber,
    pub maintenance: TriangularFuzzyNumber,
    pub maturity: TriangularFuzzyNumber,
}

impl CriterionWeights {
    /// Default weight configuration.
    pub const DEFAULT: Self = Self {
        popularity: TriangularFuzzyNumber::new(0.2, 0.3, 0.4),
        community: TriangularFuzzyNumber::new(0.15, 0.25, 0.35),
        maintenance: TriangularFuzzyNumber::new(0.25, 0.35, 0.45),
        maturity: TriangularFuzzyNumber::new(0.1, 0.2, 0.3),
    };

    /// Returns the weight for a criterion.
    pub fn get(&self, criterion: Criterion) -> TriangularFuzzyNumber {
        match criterion {
            Criterion::Popularity => self.popularity,
            Criterion::Community => self.community,
            Criterion::Maintenance => self.maintenance,
            Criterion::Maturity => self.maturity,
        }
    }

    /// Builds weights from an open name-keyed map.
    ///
    /// Every criterion must be present exactly once and no other key is
    /// accepted. A missing weight is reported rather than treated as zero.
    pub fn from_map(weights: &HashMap<String, TriangularFuzzyNumber>) -> Result<Self, ValidationError> {
        let mut resolved: HashMap<Criterion, TriangularFuzzyNumber> = HashMap::new();
        for (name, weight) in weights {
            let criterion: Criterion = name.parse()?;
            if resolved.insert(criterion, *weight).is_some() {
                return Err(ValidationError::invalid_format(
                    "weights",
                    format!("criterion '{}' given more than once", criterion),
                ));
            }
        }

        let take = |criterion: Criterion| {
            resolved
                .get(&criterion)
                .copied()
                .ok_or_else(|| ValidationError::missing_criterion(criterion.as_str()))
        };

        Ok(Self {
            popularity: take(Criterion::Popularity)?,
            community: take(Criterion::Community)?,
            maintenance: take(Criterion::Maintenance)?,
            maturity: take(Criterion::Maturity)?,
        })
    }

    /// Checks every weight is finite and ordered `low <= mid <= high`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for criterion in Criterion::ALL {
            let w = self.get(criterion);
            if !(w.low.is_finite() && w.mid.is_finite() && w.high.is_finite()) {
                return Err(ValidationError::invalid_format(
                    criterion.as_str(),
                    "weight components must be finite",
                ));
            }
            if !w.is_ordered() {
                return Err(ValidationError::invalid_format(
                    criterion.as_str(),
                    format!("weight {} is not ordered low <= mid <= high", w),
                ));
            }
        }
        Ok(())
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, TriangularFuzzyNumber> {
        Criterion::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), CriterionWeights::DEFAULT.get(*c)))
            .collect()
    }

    #[test]
    fn criterion_order_is_fixed() {
        let names: Vec<_> = Criterion::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["popularity", "community", "maintenance", "maturity"]);
    }

    #[test]
    fn criterion_parses_case_insensitively() {
        assert_eq!("Maturity".parse::<Criterion>().unwrap(), Criterion::Maturity);
        assert!("speed".parse::<Criterion>().is_err());
    }

    #[test]
    fn default_weights_match_configuration() {
        let w = CriterionWeights::default();
        assert_eq!(w.popularity, TriangularFuzzyNumber::new(0.2, 0.3, 0.4));
        assert_eq!(w.community, TriangularFuzzyNumber::new(0.15, 0.25, 0.35));
        assert_eq!(w.maintenance, TriangularFuzzyNumber::new(0.25, 0.35, 0.45));
        assert_eq!(w.maturity, TriangularFuzzyNumber::new(0.1, 0.2, 0.3));
        assert!(w.validate().is_ok());
    }

    #[test]
    fn from_map_accepts_complete_set() {
        let weights = CriterionWeights::from_map(&full_map()).unwrap();
        assert_eq!(weights, CriterionWeights::DEFAULT);
    }

    #[test]
    fn from_map_rejects_missing_criterion() {
        let mut map = full_map();
        map.remove("maintenance");

        let err = CriterionWeights::from_map(&map).unwrap_err();
        assert_eq!(err, ValidationError::missing_criterion("maintenance"));
    }

    #[test]
    fn from_map_rejects_unknown_criterion() {
        let mut map = full_map();
        map.insert("security".to_string(), TriangularFuzzyNumber::ZERO);

        let err = CriterionWeights::from_map(&map).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCriterion { .. }));
    }

    #[test]
    fn from_map_rejects_duplicate_spelling() {
        let mut map = full_map();
        map.insert("Popularity".to_string(), TriangularFuzzyNumber::ZERO);

        assert!(CriterionWeights::from_map(&map).is_err());
    }

    #[test]
    fn validate_rejects_unordered_weight() {
        let weights = CriterionWeights {
            community: TriangularFuzzyNumber::new(0.5, 0.2, 0.3),
            ..CriterionWeights::DEFAULT
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn deserialize_requires_every_criterion() {
        let json = r#"{
            "popularity": {"low": 0.2, "mid": 0.3, "high": 0.4},
            "community": {"low": 0.15, "mid": 0.25, "high": 0.35},
            "maintenance": {"low": 0.25, "mid": 0.35, "high": 0.45}
        }"#;
        assert!(serde_json::from_str::<CriterionWeights>(json).is_err());
    }
}
