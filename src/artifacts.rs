//! Artifact Loading Module
//!
//! The trained classifier, scaler, and feature column list are produced by
//! the external training pipeline and consumed here as opaque JSON exports:
//! `model.json`, `scaler.json`, `columns.json` in the artifact directory.
//!
//! Loading is lazy, cached, and initialize-once: the first successful load
//! wins and every later caller shares the same read-only bundle. A failed
//! load is not cached, so the next request retries.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::core::features::FeatureSchema;
use crate::core::model::LogisticModel;
use crate::core::scaler::StandardScaler;
use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Artifact file names within the artifact directory
pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const COLUMNS_FILE: &str = "columns.json";

/// The three externally-trained artifacts, read-only after load
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: LogisticModel,
    pub scaler: StandardScaler,
    pub schema: FeatureSchema,
}

impl Artifacts {
    /// Load and cross-validate the three artifacts from `dir`
    pub fn load(dir: &Path) -> AppResult<Self> {
        let model: LogisticModel = read_json(&dir.join(MODEL_FILE))?;
        let scaler: StandardScaler = read_json(&dir.join(SCALER_FILE))?;
        let schema: FeatureSchema = read_json(&dir.join(COLUMNS_FILE))?;

        let artifacts = Self {
            model,
            scaler,
            schema,
        };
        artifacts.validate()?;
        Ok(artifacts)
    }

    /// The three artifacts must agree on the feature dimension; a
    /// mismatched export would otherwise surface as a garbled prediction.
    fn validate(&self) -> AppResult<()> {
        if self.schema.is_empty() {
            return Err(AppError::new(
                ErrorCode::ArtifactEmptySchema,
                "columns.json contains no feature columns",
            ));
        }
        self.scaler.validate()?;

        let n = self.schema.len();
        if self.scaler.n_features() != n {
            return Err(AppError::artifact_shape_mismatch(format!(
                "Schema has {} columns but scaler was fitted on {}",
                n,
                self.scaler.n_features()
            )));
        }
        if self.model.n_features() != n {
            return Err(AppError::artifact_shape_mismatch(format!(
                "Schema has {} columns but model has {} coefficients",
                n,
                self.model.n_features()
            )));
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::artifact_missing(path.display().to_string())
        } else {
            AppError::with_source(
                ErrorCode::Unknown,
                format!("Failed to read {}", path.display()),
                e,
            )
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::with_source(
            ErrorCode::ArtifactCorrupt,
            format!("Failed to parse {}", path.display()),
            e,
        )
    })
}

/// Lazily-initialized, read-only artifact store.
///
/// Replaces ambient global state with an explicit initialize-once guard:
/// concurrent first loads may race, but exactly one bundle is stored and
/// every caller observes it.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    cell: OnceLock<Artifacts>,
}

impl ArtifactStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Already-loaded bundle, if any
    pub fn get(&self) -> Option<&Artifacts> {
        self.cell.get()
    }

    /// Return the cached bundle, loading it from `dir` on first use
    pub fn get_or_load(&self, dir: &Path) -> AppResult<&Artifacts> {
        if let Some(artifacts) = self.cell.get() {
            return Ok(artifacts);
        }

        let loaded = Artifacts::load(dir)?;
        info!(
            "📦 Artifacts loaded from {}: {} feature columns",
            dir.display(),
            loaded.schema.len()
        );
        Ok(self.cell.get_or_init(|| loaded))
    }
}
