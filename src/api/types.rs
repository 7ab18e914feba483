//! API Request/Response Types

use serde::Serialize;

use crate::core::predictor::Prediction;
use crate::models::config::FeatureDefaults;
use crate::models::errors::{AppError, ErrorCode};
use crate::telemetry::TelemetryStats;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Map an internal error to its user-facing rendition. Validation
    /// errors pass through; artifact and pipeline failures collapse to a
    /// generic message (detail goes to the log only).
    pub fn from_app_error(err: &AppError) -> Self {
        let message = if err.code.is_user_facing() {
            err.message.clone()
        } else {
            match err.code {
                ErrorCode::ArtifactMissing
                | ErrorCode::ArtifactCorrupt
                | ErrorCode::ArtifactShapeMismatch
                | ErrorCode::ArtifactEmptySchema => "Failed to load model files".to_string(),
                _ => "Prediction failed".to_string(),
            }
        };
        Self {
            code: err.code_str().to_string(),
            message,
            details: None,
        }
    }
}

// ============================================
// Predict
// ============================================

// The request body is `models::types::RawInputs` directly: the form
// fields deserialize into the same struct the pipeline consumes.

#[derive(Debug, Serialize)]
pub struct PredictData {
    /// "Likely Approved" / "Likely Rejected"
    pub verdict: String,
    pub approved: bool,
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    /// Formatted percentage for direct display (e.g. "87.32%")
    pub probability_percent: String,
    /// Verdict color for the UI
    pub color: String,
    /// One-hot candidates that matched no schema column
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched_categories: Vec<String>,
}

impl From<Prediction> for PredictData {
    fn from(prediction: Prediction) -> Self {
        Self {
            verdict: prediction.verdict.as_str().to_string(),
            approved: prediction.approved,
            probability: prediction.probability,
            probability_percent: format!("{:.2}%", prediction.probability * 100.0),
            color: prediction.verdict.color_code().to_string(),
            unmatched_categories: prediction.unmatched_categories,
        }
    }
}

// ============================================
// Schema
// ============================================

#[derive(Debug, Serialize)]
pub struct SchemaData {
    /// Feature columns in training order
    pub feature_columns: Vec<String>,
    /// Fixed defaults applied to every prediction
    pub defaults: DefaultsData,
}

#[derive(Debug, Serialize)]
pub struct DefaultsData {
    pub coapplicant_income: f64,
    pub age: f64,
    pub dependents: f64,
    pub existing_loans: f64,
    pub savings: f64,
    pub collateral_value: f64,
    pub marital_status: String,
    pub employer_category: String,
}

impl From<FeatureDefaults> for DefaultsData {
    fn from(defaults: FeatureDefaults) -> Self {
        Self {
            coapplicant_income: defaults.coapplicant_income,
            age: defaults.age,
            dependents: defaults.dependents,
            existing_loans: defaults.existing_loans,
            savings: defaults.savings,
            collateral_value: defaults.collateral_value,
            marital_status: defaults.marital_status.as_str().to_string(),
            employer_category: defaults.employer_category.as_str().to_string(),
        }
    }
}

// ============================================
// Stats / Health
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub total_predictions: u64,
    pub approved: u64,
    pub rejected: u64,
    pub failures: u64,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

impl StatsData {
    pub fn from_stats(stats: TelemetryStats, uptime_seconds: u64) -> Self {
        Self {
            total_predictions: stats.total_predictions,
            approved: stats.approved,
            rejected: stats.rejected,
            failures: stats.failures,
            avg_latency_ms: stats.avg_latency_ms,
            uptime_seconds,
            api_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Whether the model/scaler/schema bundle is loaded
    pub artifacts_loaded: bool,
}
