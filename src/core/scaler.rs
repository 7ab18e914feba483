//! Standard Scaler
//!
//! Per-column standardization exported by the training pipeline:
//! transform is `(x - mean) / scale` elementwise. The vectors are aligned
//! to the same column order as the feature schema.

use serde::{Deserialize, Serialize};

use crate::core::features::FeatureRow;
use crate::models::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Number of columns this scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Internal consistency: mean and scale must be the same length and
    /// no scale entry may be zero (the training export substitutes 1.0
    /// for zero-variance columns).
    pub fn validate(&self) -> AppResult<()> {
        if self.mean.len() != self.scale.len() {
            return Err(AppError::artifact_shape_mismatch(format!(
                "Scaler mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(AppError::artifact_corrupt(
                "Scaler contains a zero or non-finite scale entry",
            ));
        }
        Ok(())
    }

    /// Standardize one feature row
    pub fn transform(&self, row: &FeatureRow) -> AppResult<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(AppError::predict_shape_mismatch(self.n_features(), row.len()));
        }

        Ok(row
            .values()
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::{FeatureRowBuilder, FeatureSchema};

    fn row_of(schema: &FeatureSchema, values: &[(&str, f64)]) -> FeatureRow {
        let mut builder = FeatureRowBuilder::new(schema);
        for (name, v) in values {
            builder = builder.set(name, *v);
        }
        builder.build()
    }

    #[test]
    fn test_transform_standardizes() {
        let schema = FeatureSchema::new(vec!["a".to_string(), "b".to_string()]);
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        };
        let row = row_of(&schema, &[("a", 14.0), ("b", 3.0)]);

        let scaled = scaler.transform(&row).unwrap();
        assert_eq!(scaled, vec![2.0, 3.0]);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let schema = FeatureSchema::new(vec!["a".to_string()]);
        let scaler = StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        };
        let row = row_of(&schema, &[("a", 1.0)]);

        let err = scaler.transform(&row).unwrap_err();
        assert_eq!(err.code_str(), "PREDICT_SHAPE_MISMATCH");
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let scaler = StandardScaler {
            mean: vec![0.0],
            scale: vec![0.0],
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_vectors() {
        let scaler = StandardScaler {
            mean: vec![0.0, 1.0],
            scale: vec![1.0],
        };
        assert!(scaler.validate().is_err());
    }
}
