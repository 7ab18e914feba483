//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

use super::types::*;
use crate::artifacts::ArtifactStore;
use crate::core::predictor::Predictor;
use crate::models::config::{FeatureDefaults, ServiceConfig};
use crate::models::errors::AppError;
use crate::models::types::RawInputs;
use crate::telemetry::TelemetryCollector;

/// Shared application state
pub struct AppState {
    pub config: ServiceConfig,
    pub artifacts: ArtifactStore,
    pub telemetry: Arc<TelemetryCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig, telemetry: Arc<TelemetryCollector>) -> Self {
        Self {
            config,
            artifacts: ArtifactStore::new(),
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Render an AppError as the standard error envelope, logging the detail
fn error_response(
    state: &AppState,
    err: &AppError,
    start: Instant,
) -> (StatusCode, Json<ApiResponse<()>>) {
    error!("❌ Request failed: {}", err);
    state.telemetry.record_failure();

    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(
            ApiError::from_app_error(err),
            start.elapsed().as_secs_f64() * 1000.0,
        )),
    )
}

// ============================================
// Form Page
// ============================================

/// The single-form web page; posts to /v1/predict
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        artifacts_loaded: state.artifacts.get().is_some(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Predict
// ============================================

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<RawInputs>,
) -> Result<Json<ApiResponse<PredictData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    inputs
        .validate()
        .map_err(|e| error_response(&state, &e, start))?;

    // Lazy, cached artifact load; a failed load surfaces per request
    let artifacts = state
        .artifacts
        .get_or_load(&state.config.artifact_dir)
        .map_err(|e| error_response(&state, &e, start))?;

    let prediction = Predictor::new(artifacts)
        .predict(&inputs)
        .map_err(|e| error_response(&state, &e, start))?;

    state
        .telemetry
        .record_prediction(prediction.approved, start.elapsed().as_millis() as u64);

    Ok(Json(ApiResponse::success(
        prediction.into(),
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Schema
// ============================================

pub async fn get_schema(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SchemaData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    let artifacts = state
        .artifacts
        .get_or_load(&state.config.artifact_dir)
        .map_err(|e| error_response(&state, &e, start))?;

    let data = SchemaData {
        feature_columns: artifacts.schema.columns().to_vec(),
        defaults: FeatureDefaults::default().into(),
    };

    Ok(Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData::from_stats(state.telemetry.get_stats(), state.uptime_seconds());

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
