//! Logistic Regression Classifier
//!
//! The trained binary classifier, consumed as an opaque artifact: a
//! coefficient vector aligned to the feature schema plus an intercept.
//! Positive-class probability is `sigmoid(w·x + b)`; the binary label is
//! the 0.5 threshold on that probability.

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, AppResult};

/// Decision threshold on the positive-class probability
const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Number of features this model was trained on
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Probability of the positive (approved) class for one scaled row
    pub fn predict_proba(&self, scaled: &[f64]) -> AppResult<f64> {
        if scaled.len() != self.n_features() {
            return Err(AppError::predict_shape_mismatch(
                self.n_features(),
                scaled.len(),
            ));
        }

        let logit: f64 = self
            .coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        Ok(sigmoid(logit))
    }

    /// Binary label: true = positive class (approved)
    pub fn predict(&self, scaled: &[f64]) -> AppResult<bool> {
        Ok(Self::decide(self.predict_proba(scaled)?))
    }

    /// Threshold an already-computed positive-class probability
    pub fn decide(probability: f64) -> bool {
        probability >= DECISION_THRESHOLD
    }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_tails() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        // Symmetry: sigmoid(-z) = 1 - sigmoid(z)
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_proba() {
        let model = LogisticModel {
            coefficients: vec![1.0, -2.0],
            intercept: 0.5,
        };
        // logit = 1*1 - 2*0.25 + 0.5 = 1.0
        let p = model.predict_proba(&[1.0, 0.25]).unwrap();
        assert!((p - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_predict_threshold() {
        let model = LogisticModel {
            coefficients: vec![1.0],
            intercept: 0.0,
        };
        assert!(model.predict(&[3.0]).unwrap());
        assert!(!model.predict(&[-3.0]).unwrap());
        // Exactly at the threshold counts as positive
        assert!(model.predict(&[0.0]).unwrap());
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let model = LogisticModel {
            coefficients: vec![1.0, 1.0],
            intercept: 0.0,
        };
        let err = model.predict_proba(&[1.0]).unwrap_err();
        assert_eq!(err.code_str(), "PREDICT_SHAPE_MISMATCH");
    }
}
