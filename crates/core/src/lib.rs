//! Wildfire Risk Scoring Core Library
//!
//! Estimates a 0-100 wildfire risk score from four environmental measurements
//! (temperature, humidity, wind speed, vegetation moisture) and classifies it
//! into an ordinal severity level.
//!
//! ## Scoring Pipeline
//!
//! - Feature normalization with observable clamping of out-of-domain input
//! - Linear heuristic baseline scorer (also the synthetic ground truth)
//! - Ensemble predictor wrapping an externally trained regression model,
//!   with a deterministic heuristic fallback when the model is absent or fails
//! - Risk-level classification over fixed score bands
//! - Driver attribution explaining which factors push the score up
//! - Synthetic-data evaluation harness: confusion-matrix metrics, threshold
//!   calibration, and seasonal distribution-shift validation

pub mod classify;
pub mod drivers;
pub mod eval;
pub mod features;
pub mod heuristic;
pub mod predictor;

// Re-export the scoring pipeline types
pub use classify::{score_bands, RiskLevel};
pub use drivers::{rank_drivers, Driver, DriverLabel};
pub use features::{FeatureVector, NormalizedFeatures};
pub use heuristic::{heuristic_score, heuristic_score_with_interaction};
pub use predictor::{
    EnsemblePredictor, FallbackMode, LinearRegressionArtifact, ModelError, ModelState,
    RegressionModel, RiskPrediction,
};

// Re-export the evaluation harness types
pub use eval::metrics::ConfusionMatrix;
pub use eval::synthetic::LabeledSample;
pub use eval::temporal::TemporalReport;
pub use eval::{EvaluationReport, ThresholdMetrics};
