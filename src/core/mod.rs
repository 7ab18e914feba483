//! Core Module - Prediction Pipeline
//!
//! Feature-row construction, standard scaling, the logistic classifier,
//! and the predictor that chains them for one request.

pub mod features;
pub mod model;
pub mod predictor;
pub mod scaler;

pub use features::*;
pub use model::*;
pub use predictor::*;
pub use scaler::*;
