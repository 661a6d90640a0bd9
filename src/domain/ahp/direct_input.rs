//! Direct Input Normalizer - Raw scores to weight vectors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PriorityVector;
use crate::domain::foundation::ValidationError;

/// Whether larger raw scores are better or worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionDirection {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    Cost,
}

impl CriterionDirection {
    /// Maps an `is_benefit` flag onto a direction.
    pub fn from_is_benefit(is_benefit: bool) -> Self {
        if is_benefit {
            CriterionDirection::Benefit
        } else {
            CriterionDirection::Cost
        }
    }
}

/// Converts directly scored alternatives into priority vectors.
pub struct DirectInputNormalizer;

impl DirectInputNormalizer {
    /// Normalizes raw scores into weights summing to 1.
    ///
    /// # Algorithm
    /// - Benefit: `w_i = v_i / Σ v_k`
    /// - Cost: `w_i = (1 / v_i) / Σ (1 / v_k)`
    ///
    /// # Edge Cases
    /// - All values equal: uniform `1/m`
    /// - Benefit scores may be zero (that alternative gets weight 0)
    ///
    /// # Errors
    /// - `EmptyField` for an empty input
    /// - `InvalidValue` for non-finite values, negative benefit scores, or
    ///   cost scores `<= 0`
    pub fn normalize(
        values: &[f64],
        direction: CriterionDirection,
    ) -> Result<PriorityVector, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::empty_field("values"));
        }

        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::invalid_value("values", index, value, "finite"));
            }
            match direction {
                CriterionDirection::Benefit if value < 0.0 => {
                    return Err(ValidationError::invalid_value(
                        "values",
                        index,
                        value,
                        "non-negative for a benefit criterion",
                    ));
                }
                CriterionDirection::Cost if value <= 0.0 => {
                    return Err(ValidationError::invalid_value(
                        "values",
                        index,
                        value,
                        "positive for a cost criterion",
                    ));
                }
                _ => {}
            }
        }

        let first = values[0];
        if values.iter().all(|&v| v == first) {
            debug!(count = values.len(), "all direct-input values equal, using uniform weights");
            return Ok(PriorityVector::uniform(values.len()));
        }

        let scores: Vec<f64> = match direction {
            CriterionDirection::Benefit => values.to_vec(),
            CriterionDirection::Cost => values.iter().map(|v| 1.0 / v).collect(),
        };
        let total: f64 = scores.iter().sum();
        Ok(PriorityVector::new(
            scores.into_iter().map(|s| s / total).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_weights(actual: &PriorityVector, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.values().iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn benefit_scores_are_proportional() {
        let w = DirectInputNormalizer::normalize(&[10.0, 30.0, 60.0], CriterionDirection::Benefit)
            .unwrap();
        assert_weights(&w, &[0.1, 0.3, 0.6]);
    }

    #[test]
    fn cost_scores_use_reciprocals() {
        let w = DirectInputNormalizer::normalize(&[1.0, 2.0, 4.0], CriterionDirection::Cost)
            .unwrap();
        // 1 : 1/2 : 1/4 = 4 : 2 : 1
        assert_weights(&w, &[4.0 / 7.0, 2.0 / 7.0, 1.0 / 7.0]);
    }

    #[test]
    fn equal_values_give_uniform_weights() {
        let w = DirectInputNormalizer::normalize(&[5.0, 5.0, 5.0, 5.0], CriterionDirection::Cost)
            .unwrap();
        assert_weights(&w, &[0.25; 4]);

        let w = DirectInputNormalizer::normalize(&[0.0, 0.0], CriterionDirection::Benefit).unwrap();
        assert_weights(&w, &[0.5, 0.5]);
    }

    #[test]
    fn zero_benefit_score_gets_zero_weight() {
        let w = DirectInputNormalizer::normalize(&[0.0, 3.0], CriterionDirection::Benefit).unwrap();
        assert_weights(&w, &[0.0, 1.0]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = DirectInputNormalizer::normalize(&[], CriterionDirection::Benefit).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("values"));
    }

    #[test]
    fn non_positive_cost_is_rejected() {
        let err =
            DirectInputNormalizer::normalize(&[3.0, 0.0], CriterionDirection::Cost).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { index: 1, .. }));
    }

    #[test]
    fn negative_benefit_is_rejected() {
        let err = DirectInputNormalizer::normalize(&[3.0, -1.0], CriterionDirection::Benefit)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { index: 1, .. }));
    }

    #[test]
    fn non_finite_is_rejected() {
        let err = DirectInputNormalizer::normalize(&[f64::INFINITY, 1.0], CriterionDirection::Benefit)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { index: 0, .. }));
    }

    #[test]
    fn direction_from_flag() {
        assert_eq!(CriterionDirection::from_is_benefit(true), CriterionDirection::Benefit);
        assert_eq!(CriterionDirection::from_is_benefit(false), CriterionDirection::Cost);
    }
}
