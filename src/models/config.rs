//! Configuration module for the CreditWise service
//! Input bounds, fixed feature defaults, and server settings

use std::path::PathBuf;

use crate::models::types::{EmployerCategory, MaritalStatus};

// ============================================
// INPUT BOUNDS (mirror the form widgets)
// ============================================

pub const MIN_APPLICANT_INCOME: f64 = 0.0;
pub const MIN_LOAN_AMOUNT: f64 = 1000.0;
pub const MIN_LOAN_TERM_MONTHS: f64 = 6.0;
pub const MAX_LOAN_TERM_MONTHS: f64 = 240.0;
pub const LOAN_TERM_STEP_MONTHS: f64 = 6.0;
pub const MIN_CREDIT_SCORE: f64 = 300.0;
pub const MAX_CREDIT_SCORE: f64 = 900.0;
pub const MIN_DTI_RATIO: f64 = 0.0;
pub const MAX_DTI_RATIO: f64 = 1.2;

// ============================================
// FEATURE DEFAULTS
// ============================================

/// Fixed values for the lower-impact model features the compact form does
/// not expose. Applied identically to every prediction. The literal values
/// come from the training side and are opaque configuration data.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDefaults {
    pub coapplicant_income: f64,
    pub age: f64,
    pub dependents: f64,
    pub existing_loans: f64,
    pub savings: f64,
    pub collateral_value: f64,
    pub marital_status: MaritalStatus,
    pub employer_category: EmployerCategory,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            coapplicant_income: 5205.5,
            age: 40.0,
            dependents: 1.0,
            existing_loans: 2.0,
            savings: 9880.5,
            collateral_value: 24321.0,
            marital_status: MaritalStatus::Married,
            employer_category: EmployerCategory::Private,
        }
    }
}

// ============================================
// SERVICE CONFIG
// ============================================

/// Server configuration, resolved from environment variables with
/// deploy-friendly defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host
    pub host: String,

    /// Bind port (PORT is honored first for PaaS deploys)
    pub port: u16,

    /// Directory holding model.json / scaler.json / columns.json
    pub artifact_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("CREDITWISE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .or_else(|_| std::env::var("CREDITWISE_PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            artifact_dir: std::env::var("CREDITWISE_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("artifacts")),
        }
    }
}
