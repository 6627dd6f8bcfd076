//! Ensemble predictor wrapping an externally trained regression model
//!
//! The predictor owns an optional model handle, loaded once at construction
//! and never mutated afterward, so it is safe to share across concurrent
//! prediction requests. An absent or unloadable model is a valid permanent
//! state: the predictor degrades to the heuristic fallback and the serving
//! path never fails. Availability is prioritized over precision.

use crate::classify::RiskLevel;
use crate::drivers::rank_drivers;
use crate::features::{FeatureVector, NormalizedFeatures};
use crate::heuristic::{heuristic_score, heuristic_score_with_interaction};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Bound of the uniform noise injected by the audit-only fallback mode
const NOISE_BOUND: f32 = 5.0;

/// Model identifier reported when scoring falls back to the heuristic
const FALLBACK_IDENTIFIER: &str = "heuristic-fallback";

/// Errors from loading or invoking an external regression model
///
/// These never escape the scoring path: invocation errors are logged and
/// downgraded to the fallback, and load errors leave the predictor in the
/// supported `Unloaded` state.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model produced a non-finite score: {0}")]
    NonFinite(f32),
}

/// Black-box contract for an externally trained regression model
///
/// Input is the four raw feature values in fixed order (temperature,
/// humidity, wind speed, vegetation moisture); output is interpreted as a
/// score on the 0-100 scale and clamped by the caller.
pub trait RegressionModel: Send + Sync {
    /// Predict a raw 0-100 risk score from unnormalized feature values
    fn predict(&self, features: [f32; 4]) -> Result<f32, ModelError>;

    /// Identifier recorded in evaluation reports
    fn identifier(&self) -> &str;
}

/// Serialized regression artifact: fitted coefficients over the four raw
/// features plus an intercept, producing scores on the 0-100 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionArtifact {
    pub name: String,
    /// Coefficients in model input order
    pub coefficients: [f32; 4],
    pub intercept: f32,
}

impl LinearRegressionArtifact {
    /// Load an artifact from its well-known path
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        let artifact = serde_json::from_reader(BufReader::new(file))?;
        Ok(artifact)
    }
}

impl RegressionModel for LinearRegressionArtifact {
    fn predict(&self, features: [f32; 4]) -> Result<f32, ModelError> {
        let raw: f32 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, f)| c * f)
            .sum::<f32>()
            + self.intercept;
        if !raw.is_finite() {
            return Err(ModelError::NonFinite(raw));
        }
        Ok(raw.clamp(0.0, 100.0))
    }

    fn identifier(&self) -> &str {
        &self.name
    }
}

/// Whether an external model is available for scoring
pub enum ModelState {
    Loaded(Box<dyn RegressionModel>),
    Unloaded,
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Loaded(model) => write!(f, "Loaded({})", model.identifier()),
            ModelState::Unloaded => f.write_str("Unloaded"),
        }
    }
}

/// Fallback behavior when the external model is absent or fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Heuristic plus interaction bonus, zero noise. Production default.
    #[default]
    Deterministic,
    /// Adds bounded uniform noise (±5) to emulate model stochasticity.
    /// Used only by stress/audit tooling, never for deterministic comparisons.
    SimulatedNoise,
}

/// Full prediction returned to the serving layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Ensemble score, 0-100, rounded to 2 decimal places
    pub risk_score: f32,
    pub risk_level: RiskLevel,
    /// Heuristic baseline score for comparison, 0-100, 2 decimal places
    pub baseline_score: f32,
    pub baseline_level: RiskLevel,
    /// Ranked driver names, at most 3, never empty
    pub primary_drivers: Vec<String>,
}

/// Risk predictor with an optional external model and heuristic fallback
#[derive(Debug)]
pub struct EnsemblePredictor {
    model: ModelState,
    fallback_mode: FallbackMode,
}

impl EnsemblePredictor {
    /// Create a predictor over an explicit model state
    pub fn new(model: ModelState) -> Self {
        EnsemblePredictor {
            model,
            fallback_mode: FallbackMode::Deterministic,
        }
    }

    /// Predictor with no external model: pure heuristic scoring
    pub fn heuristic_only() -> Self {
        EnsemblePredictor::new(ModelState::Unloaded)
    }

    /// Load the model artifact from its well-known path
    ///
    /// A missing or corrupt artifact is a supported degrade condition, not a
    /// startup failure: the predictor stays on the heuristic fallback for the
    /// process lifetime.
    pub fn from_artifact_path(path: &Path) -> Self {
        match LinearRegressionArtifact::load(path) {
            Ok(artifact) => {
                info!(path = %path.display(), model = %artifact.name, "loaded model artifact");
                EnsemblePredictor::new(ModelState::Loaded(Box::new(artifact)))
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "model artifact unavailable, using heuristic fallback");
                EnsemblePredictor::heuristic_only()
            }
        }
    }

    /// Select the fallback mode (production default is deterministic)
    pub fn with_fallback_mode(mut self, mode: FallbackMode) -> Self {
        self.fallback_mode = mode;
        self
    }

    /// True when an external model is loaded
    pub fn has_model(&self) -> bool {
        matches!(self.model, ModelState::Loaded(_))
    }

    /// Identifier of the active scoring path
    pub fn model_identifier(&self) -> &str {
        match &self.model {
            ModelState::Loaded(model) => model.identifier(),
            ModelState::Unloaded => FALLBACK_IDENTIFIER,
        }
    }

    /// Score raw features on the 0-100 scale. Never fails.
    ///
    /// Model invocation errors are logged and downgraded to the fallback
    /// path; the caller always receives a usable score.
    pub fn score(&self, raw: &FeatureVector) -> f32 {
        if let ModelState::Loaded(model) = &self.model {
            match model.predict(raw.as_model_input()) {
                Ok(score) => return score.clamp(0.0, 100.0),
                Err(err) => {
                    warn!(%err, "model invocation failed, falling back to heuristic");
                }
            }
        }
        self.fallback_score(raw)
    }

    /// Heuristic fallback: baseline plus interaction bonus, clamped
    fn fallback_score(&self, raw: &FeatureVector) -> f32 {
        let n = NormalizedFeatures::from_raw(raw);
        let mut score = heuristic_score_with_interaction(&n);
        if self.fallback_mode == FallbackMode::SimulatedNoise {
            let mut rng = rand::rng();
            score += rng.random_range(-NOISE_BOUND..NOISE_BOUND);
        }
        score.clamp(0.0, 100.0)
    }

    /// Full prediction with baseline comparison and driver attribution
    pub fn predict(&self, raw: &FeatureVector) -> RiskPrediction {
        let n = NormalizedFeatures::from_raw(raw);
        let risk_score = round2(self.score(raw));
        let baseline_score = round2(heuristic_score(&n));

        RiskPrediction {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            baseline_score,
            baseline_level: RiskLevel::from_score(baseline_score),
            primary_drivers: rank_drivers(&n)
                .iter()
                .map(|d| d.label.as_str().to_owned())
                .collect(),
        }
    }
}

/// Round to 2 decimal places for the external interface
fn round2(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}
