//! Prediction Pipeline
//!
//! Orchestrates one prediction: build the feature row, standardize it,
//! run the classifier, and wrap the label + probability into a verdict.

use tracing::{debug, warn};

use crate::artifacts::Artifacts;
use crate::core::features::build_feature_row;
use crate::core::model::LogisticModel;
use crate::models::config::FeatureDefaults;
use crate::models::errors::AppResult;
use crate::models::types::{RawInputs, Verdict};

/// Outcome of one prediction
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Binary class label (positive = approved)
    pub approved: bool,
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    pub verdict: Verdict,
    /// One-hot candidates that matched no schema column (unknown or
    /// reference categories); empty on a clean build
    pub unmatched_categories: Vec<String>,
}

/// Stateless prediction front-end over a loaded artifact bundle
pub struct Predictor<'a> {
    artifacts: &'a Artifacts,
    defaults: FeatureDefaults,
}

impl<'a> Predictor<'a> {
    pub fn new(artifacts: &'a Artifacts) -> Self {
        Self {
            artifacts,
            defaults: FeatureDefaults::default(),
        }
    }

    /// Override the fixed defaults
    pub fn with_defaults(artifacts: &'a Artifacts, defaults: FeatureDefaults) -> Self {
        Self {
            artifacts,
            defaults,
        }
    }

    /// Run the full pipeline for one set of applicant inputs
    pub fn predict(&self, inputs: &RawInputs) -> AppResult<Prediction> {
        let row = build_feature_row(inputs, &self.defaults, &self.artifacts.schema);
        if !row.unmatched_candidates().is_empty() {
            warn!(
                "⚠️ {} one-hot candidate(s) not in schema: {}",
                row.unmatched_candidates().len(),
                row.unmatched_candidates().join(", ")
            );
        }

        let scaled = self.artifacts.scaler.transform(&row)?;
        let probability = self.artifacts.model.predict_proba(&scaled)?;
        let approved = LogisticModel::decide(probability);
        let verdict = Verdict::from_label(approved);

        debug!(
            "🎯 Prediction: {} ({:.2}% approval probability)",
            verdict.as_str(),
            probability * 100.0
        );

        Ok(Prediction {
            approved,
            probability,
            verdict,
            unmatched_categories: row.unmatched_candidates().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::FeatureSchema;
    use crate::core::scaler::StandardScaler;
    use crate::models::types::{
        EducationLevel, EmploymentStatus, Gender, LoanPurpose, PropertyArea,
    };

    /// Tiny hand-built bundle: the only non-zero coefficient rewards
    /// Education_Level, so graduate applicants approve and others reject.
    fn education_only_artifacts() -> Artifacts {
        let schema = FeatureSchema::new(
            ["Education_Level", "Loan_Amount", "Gender_Male"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        Artifacts {
            model: LogisticModel {
                coefficients: vec![4.0, 0.0, 0.0],
                intercept: -2.0,
            },
            scaler: StandardScaler {
                mean: vec![0.0, 0.0, 0.0],
                scale: vec![1.0, 1.0, 1.0],
            },
            schema,
        }
    }

    fn inputs(education: EducationLevel) -> RawInputs {
        RawInputs {
            applicant_income: 10548.0,
            loan_amount: 21210.5,
            loan_term: 48.0,
            credit_score: 678.0,
            dti_ratio: 0.34,
            education_level: education,
            employment_status: EmploymentStatus::Salaried,
            loan_purpose: LoanPurpose::Home,
            property_area: PropertyArea::Urban,
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_graduate_approved_non_graduate_rejected() {
        let artifacts = education_only_artifacts();
        let predictor = Predictor::new(&artifacts);

        // Graduate: logit = 4*1 - 2 = 2 -> p ~ 0.88
        let approved = predictor.predict(&inputs(EducationLevel::Graduate)).unwrap();
        assert!(approved.approved);
        assert_eq!(approved.verdict, Verdict::LikelyApproved);
        assert!(approved.probability > 0.85);

        // Not Graduate: logit = -2 -> p ~ 0.12
        let rejected = predictor
            .predict(&inputs(EducationLevel::NotGraduate))
            .unwrap();
        assert!(!rejected.approved);
        assert_eq!(rejected.verdict, Verdict::LikelyRejected);
        assert!(rejected.probability < 0.15);
    }

    #[test]
    fn test_unmatched_categories_surface_in_prediction() {
        let artifacts = education_only_artifacts();
        let predictor = Predictor::new(&artifacts);

        let prediction = predictor.predict(&inputs(EducationLevel::Graduate)).unwrap();
        // The tiny schema only knows Gender_Male; every other one-hot
        // candidate is reported, not silently dropped.
        assert!(prediction
            .unmatched_categories
            .contains(&"Employment_Status_Salaried".to_string()));
        assert!(prediction
            .unmatched_categories
            .contains(&"Loan_Purpose_Home".to_string()));
        assert!(!prediction
            .unmatched_categories
            .contains(&"Gender_Male".to_string()));
    }

    #[test]
    fn test_default_categories_come_from_configuration() {
        let schema = FeatureSchema::new(
            ["Education_Level", "Marital_Status_Married"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let artifacts = Artifacts {
            model: LogisticModel {
                coefficients: vec![0.0, 0.0],
                intercept: 0.0,
            },
            scaler: StandardScaler {
                mean: vec![0.0, 0.0],
                scale: vec![1.0, 1.0],
            },
            schema,
        };

        // Nothing in RawInputs mentions marital status; switching the
        // configured default flips the one-hot match.
        let defaults = FeatureDefaults {
            marital_status: crate::models::types::MaritalStatus::Single,
            ..FeatureDefaults::default()
        };
        let predictor = Predictor::with_defaults(&artifacts, defaults);
        let prediction = predictor.predict(&inputs(EducationLevel::Graduate)).unwrap();
        assert!(prediction
            .unmatched_categories
            .contains(&"Marital_Status_Single".to_string()));

        let predictor = Predictor::new(&artifacts);
        let prediction = predictor.predict(&inputs(EducationLevel::Graduate)).unwrap();
        assert!(!prediction
            .unmatched_categories
            .contains(&"Marital_Status_Married".to_string()));
    }

    #[test]
    fn test_probability_is_bounded() {
        let artifacts = education_only_artifacts();
        let predictor = Predictor::new(&artifacts);
        let prediction = predictor.predict(&inputs(EducationLevel::Graduate)).unwrap();
        assert!(prediction.probability > 0.0 && prediction.probability < 1.0);
    }
}
