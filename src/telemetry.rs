//! Telemetry Module for CreditWise
//!
//! Collects anonymous in-process counters about served predictions for
//! performance monitoring and operations dashboards.
//!
//! Privacy-first: no applicant attributes are stored, only counts and
//! latency aggregates.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    /// Total predictions served
    pub total_predictions: u64,
    /// Predictions with an approved verdict
    pub approved: u64,
    /// Predictions with a rejected verdict
    pub rejected: u64,
    /// Requests that failed in artifact loading or the pipeline
    pub failures: u64,
    /// Average end-to-end prediction latency (ms)
    pub avg_latency_ms: f64,
    /// Period start timestamp
    pub period_start: u64,
    /// Period end timestamp
    pub period_end: u64,
}

/// Thread-safe telemetry collector backed by atomic counters
pub struct TelemetryCollector {
    total_predictions: AtomicU64,
    approved: AtomicU64,
    rejected: AtomicU64,
    failures: AtomicU64,
    total_latency_ms: AtomicU64,
    period_start: u64,
    export_dir: PathBuf,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self::with_export_dir(PathBuf::from("telemetry_exports"))
    }

    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            total_predictions: AtomicU64::new(0),
            approved: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            period_start: current_timestamp(),
            export_dir,
        }
    }

    /// Record one served prediction
    pub fn record_prediction(&self, approved: bool, latency_ms: u64) {
        self.total_predictions.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        if approved {
            self.approved.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a request that failed in loading or prediction
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the current aggregates
    pub fn get_stats(&self) -> TelemetryStats {
        let total = self.total_predictions.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);
        let avg_latency_ms = if total > 0 {
            total_latency as f64 / total as f64
        } else {
            0.0
        };

        TelemetryStats {
            total_predictions: total,
            approved: self.approved.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            avg_latency_ms,
            period_start: self.period_start,
            period_end: current_timestamp(),
        }
    }

    /// Export current stats as a timestamped JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self
            .export_dir
            .join(format!("creditwise_stats_{}.json", stats.period_end));
        fs::write(&path, serde_json::to_string_pretty(&stats)?)?;
        Ok(path)
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let telemetry = TelemetryCollector::new();
        telemetry.record_prediction(true, 10);
        telemetry.record_prediction(true, 20);
        telemetry.record_prediction(false, 30);
        telemetry.record_failure();

        let stats = telemetry.get_stats();
        assert_eq!(stats.total_predictions, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.failures, 1);
        assert!((stats.avg_latency_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_have_zero_latency() {
        let telemetry = TelemetryCollector::new();
        let stats = telemetry.get_stats();
        assert_eq!(stats.total_predictions, 0);
        assert_eq!(stats.avg_latency_ms, 0.0);
    }

    #[test]
    fn test_export_writes_json() {
        let dir = std::env::temp_dir().join(format!("creditwise-telemetry-{}", uuid::Uuid::new_v4()));
        let telemetry = TelemetryCollector::with_export_dir(dir.clone());
        telemetry.record_prediction(true, 5);

        let path = telemetry.export_stats_json().unwrap();
        let parsed: TelemetryStats =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.total_predictions, 1);
        fs::remove_dir_all(&dir).ok();
    }
}
