//! CreditWise Library
//!
//! Loan approval prediction service around an externally-trained
//! logistic-regression classifier:
//! - Feature-row construction matching the training-time column layout
//! - Standard scaling and classification over JSON artifact exports
//! - An axum HTTP API serving the single-form web page and predictions

pub mod api;
pub mod artifacts;
pub mod core;
pub mod models;
pub mod telemetry;

pub use crate::artifacts::{ArtifactStore, Artifacts};
pub use crate::core::features::{build_feature_row, FeatureRow, FeatureRowBuilder, FeatureSchema};
pub use crate::core::model::LogisticModel;
pub use crate::core::predictor::{Prediction, Predictor};
pub use crate::core::scaler::StandardScaler;
pub use crate::models::config::{FeatureDefaults, ServiceConfig};
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{
    EducationLevel, EmployerCategory, EmploymentStatus, Gender, LoanPurpose, MaritalStatus,
    PropertyArea, RawInputs, Verdict,
};
pub use crate::telemetry::{TelemetryCollector, TelemetryStats};
