//! Centralized Error Handling Module
//!
//! Every failure has a unique error code so production logs can be
//! grepped and monitored without parsing free-form messages.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - ARTIFACT_xxx: model/scaler/schema loading errors
//! - PREDICT_xxx: prediction pipeline errors
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
/// All errors must flow through this type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Artifact Errors (1xx)
    // ============================================
    /// Artifact file missing on disk
    ArtifactMissing,
    /// Artifact file exists but cannot be parsed
    ArtifactCorrupt,
    /// Model/scaler/schema dimensions disagree
    ArtifactShapeMismatch,
    /// Schema artifact is empty
    ArtifactEmptySchema,

    // ============================================
    // Prediction Errors (2xx)
    // ============================================
    /// Feature row length does not match scaler/model dimensions
    PredictShapeMismatch,
    /// Prediction pipeline failed (generic)
    PredictFailed,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format or out-of-range input
    ApiBadRequest,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,
    /// Resource not found
    ApiNotFound,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors (9xx)
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            // Artifact Errors
            Self::ArtifactMissing => "ARTIFACT_MISSING",
            Self::ArtifactCorrupt => "ARTIFACT_CORRUPT",
            Self::ArtifactShapeMismatch => "ARTIFACT_SHAPE_MISMATCH",
            Self::ArtifactEmptySchema => "ARTIFACT_EMPTY_SCHEMA",

            // Prediction Errors
            Self::PredictShapeMismatch => "PREDICT_SHAPE_MISMATCH",
            Self::PredictFailed => "PREDICT_FAILED",

            // API Errors
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiNotFound => "API_NOT_FOUND",

            // Configuration Errors
            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            // Generic
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::ConfigInvalidValue => 400,
            Self::ApiNotFound => 404,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }

    /// Check if the error message is safe to show verbatim to end users.
    /// Artifact and pipeline failures get a generic message instead;
    /// the detail only goes to the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::ApiBadRequest | Self::ApiRateLimited | Self::ApiNotFound
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Artifact file missing
    pub fn artifact_missing(path: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ArtifactMissing,
            format!("Artifact not found: {}", path.into()),
        )
    }

    /// Artifact parse failure
    pub fn artifact_corrupt(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactCorrupt, msg)
    }

    /// Artifact dimensions disagree
    pub fn artifact_shape_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactShapeMismatch, msg)
    }

    /// Row length vs scaler/model dimension mismatch
    pub fn predict_shape_mismatch(expected: usize, got: usize) -> Self {
        Self::new(
            ErrorCode::PredictShapeMismatch,
            format!("Expected {} features, got {}", expected, got),
        )
    }

    /// Prediction pipeline failure
    pub fn predict_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PredictFailed, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let code = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::ArtifactMissing
        } else {
            ErrorCode::Unknown
        };
        Self::with_source(code, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ArtifactCorrupt, "JSON parse error", err)
    }
}
