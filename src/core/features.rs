//! Feature Row Construction
//!
//! Maps the compact form inputs plus fixed defaults into the exact
//! feature-vector layout the trained classifier expects. A wrong column,
//! a wrong encoding, or a wrong ordering silently produces a wrong
//! prediction with no error, so this module is the one piece that must
//! reproduce the training pipeline exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::config::FeatureDefaults;
use crate::models::types::{EducationLevel, RawInputs};

/// Canonical feature column names used by the training pipeline
pub mod col {
    pub const APPLICANT_INCOME: &str = "Applicant_Income";
    pub const COAPPLICANT_INCOME: &str = "Coapplicant_Income";
    pub const AGE: &str = "Age";
    pub const DEPENDENTS: &str = "Dependents";
    pub const EXISTING_LOANS: &str = "Existing_Loans";
    pub const SAVINGS: &str = "Savings";
    pub const COLLATERAL_VALUE: &str = "Collateral_Value";
    pub const LOAN_AMOUNT: &str = "Loan_Amount";
    pub const LOAN_TERM: &str = "Loan_Term";
    pub const EDUCATION_LEVEL: &str = "Education_Level";
    pub const DTI_RATIO_SQ: &str = "DTI_Ratio_sq";
    pub const CREDIT_SCORE_SQ: &str = "Credit_Score_sq";
    pub const APPLICANT_INCOME_LOG: &str = "Applicant_Income_Log";

    // One-hot field prefixes; encoded columns are "<Field>_<Category>"
    pub const EMPLOYMENT_STATUS: &str = "Employment_Status";
    pub const MARITAL_STATUS: &str = "Marital_Status";
    pub const LOAN_PURPOSE: &str = "Loan_Purpose";
    pub const PROPERTY_AREA: &str = "Property_Area";
    pub const GENDER: &str = "Gender";
    pub const EMPLOYER_CATEGORY: &str = "Employer_Category";
}

/// Ordered feature column list, defined at training time.
/// Serialized as a plain JSON array of names; the position index is
/// rebuilt on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { columns, index }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in training order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// O(1) position lookup for a column name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

impl From<Vec<String>> for FeatureSchema {
    fn from(columns: Vec<String>) -> Self {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.columns
    }
}

/// One numeric vector aligned to a [`FeatureSchema`].
/// Derived entirely from inputs + defaults; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<f64>,
    unmatched: Vec<String>,
}

impl FeatureRow {
    /// Values in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One-hot candidates that named no schema column. Each of these is a
    /// category the training set never saw (or the dropped reference
    /// category); the row simply carries 0.0 there, but callers can report
    /// the mismatch instead of swallowing it.
    pub fn unmatched_candidates(&self) -> &[String] {
        &self.unmatched
    }
}

/// Builder for one feature row over a fixed schema.
///
/// Writes to columns absent from the schema are dropped without error,
/// matching the frame-alignment semantics of the training pipeline; the
/// one-hot path additionally records the miss.
pub struct FeatureRowBuilder<'a> {
    schema: &'a FeatureSchema,
    values: Vec<f64>,
    unmatched: Vec<String>,
}

impl<'a> FeatureRowBuilder<'a> {
    /// Start from an all-zero row (default-absent strategy for one-hot
    /// columns).
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.len()],
            unmatched: Vec::new(),
        }
    }

    /// Assign a named column. No-op when the schema lacks the column.
    pub fn set(mut self, column: &str, value: f64) -> Self {
        if let Some(i) = self.schema.position(column) {
            self.values[i] = value;
        }
        self
    }

    /// Set the one-hot column `"<field>_<category>"` to 1.0 when present
    /// in the schema. An absent candidate leaves the row untouched and is
    /// recorded as unmatched.
    pub fn one_hot(mut self, field: &str, category: &str) -> Self {
        let candidate = format!("{}_{}", field, category);
        match self.schema.position(&candidate) {
            Some(i) => self.values[i] = 1.0,
            None => {
                warn!("⚠️ One-hot category not in schema: {}", candidate);
                self.unmatched.push(candidate);
            }
        }
        self
    }

    pub fn build(self) -> FeatureRow {
        FeatureRow {
            values: self.values,
            unmatched: self.unmatched,
        }
    }
}

/// Build the single feature row for one prediction.
///
/// Direct numerics come from the form, the remaining numerics from the
/// fixed defaults; education is binarized; the categorical fields are
/// one-hot encoded against the schema; the engineered columns are squared
/// DTI ratio, squared credit score, and log1p of applicant income.
pub fn build_feature_row(
    inputs: &RawInputs,
    defaults: &FeatureDefaults,
    schema: &FeatureSchema,
) -> FeatureRow {
    let education = if inputs.education_level == EducationLevel::Graduate {
        1.0
    } else {
        0.0
    };

    FeatureRowBuilder::new(schema)
        .set(col::APPLICANT_INCOME, inputs.applicant_income)
        .set(col::COAPPLICANT_INCOME, defaults.coapplicant_income)
        .set(col::AGE, defaults.age)
        .set(col::DEPENDENTS, defaults.dependents)
        .set(col::EXISTING_LOANS, defaults.existing_loans)
        .set(col::SAVINGS, defaults.savings)
        .set(col::COLLATERAL_VALUE, defaults.collateral_value)
        .set(col::LOAN_AMOUNT, inputs.loan_amount)
        .set(col::LOAN_TERM, inputs.loan_term)
        .set(col::EDUCATION_LEVEL, education)
        .one_hot(col::EMPLOYMENT_STATUS, inputs.employment_status.as_str())
        .one_hot(col::MARITAL_STATUS, defaults.marital_status.as_str())
        .one_hot(col::LOAN_PURPOSE, inputs.loan_purpose.as_str())
        .one_hot(col::PROPERTY_AREA, inputs.property_area.as_str())
        .one_hot(col::GENDER, inputs.gender.as_str())
        .one_hot(col::EMPLOYER_CATEGORY, defaults.employer_category.as_str())
        .set(col::DTI_RATIO_SQ, inputs.dti_ratio * inputs.dti_ratio)
        .set(
            col::CREDIT_SCORE_SQ,
            inputs.credit_score * inputs.credit_score,
        )
        .set(col::APPLICANT_INCOME_LOG, inputs.applicant_income.ln_1p())
        .build()
}
