//! Linear heuristic risk scorer
//!
//! The fixed-weight baseline formula over normalized features:
//!
//! `score = 40·nTemp + 20·nWind − 30·nHumidity − 30·nVeg + 40`
//!
//! clamped to [0,100]. Weights are chosen so that all-worst-case inputs
//! (hot, windy, dry air, dry vegetation) saturate near 100 and all-best-case
//! inputs saturate near 0.
//!
//! This formula serves double duty: it is the production fallback inside the
//! ensemble predictor AND the basis of the synthetic ground truth in the
//! evaluation harness. The two must stay numerically identical so that
//! evaluation measures genuine model skill, not a formula mismatch.

use crate::features::NormalizedFeatures;

/// Weight on normalized temperature
pub const TEMPERATURE_WEIGHT: f32 = 40.0;
/// Weight on normalized wind speed
pub const WIND_WEIGHT: f32 = 20.0;
/// Weight on normalized humidity (risk-reducing)
pub const HUMIDITY_WEIGHT: f32 = 30.0;
/// Weight on vegetation moisture (risk-reducing)
pub const VEGETATION_WEIGHT: f32 = 30.0;
/// Formula intercept
pub const INTERCEPT: f32 = 40.0;

/// Bonus applied when the heat+wind interaction gate fires
pub const INTERACTION_BONUS: f32 = 20.0;
/// Normalized temperature gate for the interaction bonus
pub const INTERACTION_TEMPERATURE_GATE: f32 = 0.8;
/// Normalized wind gate for the interaction bonus
pub const INTERACTION_WIND_GATE: f32 = 0.7;

/// Compute the linear baseline score, clamped to [0,100]
pub fn heuristic_score(n: &NormalizedFeatures) -> f32 {
    let score = TEMPERATURE_WEIGHT * n.temperature + WIND_WEIGHT * n.wind_speed
        - HUMIDITY_WEIGHT * n.humidity
        - VEGETATION_WEIGHT * n.vegetation_moisture
        + INTERCEPT;
    score.clamp(0.0, 100.0)
}

/// True when hot and windy conditions compound non-linearly
pub fn interaction_applies(n: &NormalizedFeatures) -> bool {
    n.temperature > INTERACTION_TEMPERATURE_GATE && n.wind_speed > INTERACTION_WIND_GATE
}

/// Baseline score plus the heat+wind interaction bonus, clamped to [0,100]
///
/// This is the deterministic fallback formula and the evaluation ground truth.
pub fn heuristic_score_with_interaction(n: &NormalizedFeatures) -> f32 {
    let mut score = heuristic_score(n);
    if interaction_applies(n) {
        score += INTERACTION_BONUS;
    }
    score.clamp(0.0, 100.0)
}
