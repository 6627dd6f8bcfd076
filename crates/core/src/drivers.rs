//! Driver attribution: which factors push the risk score up
//!
//! Attribution reuses the heuristic scorer's weights so the explanation stays
//! consistent with the score it explains. A factor only becomes a candidate
//! once it crosses a significance threshold on its "badness" axis (for
//! humidity and vegetation moisture that axis is dryness, `1 − n`).

use crate::features::NormalizedFeatures;
use crate::heuristic::{
    interaction_applies, HUMIDITY_WEIGHT, INTERACTION_BONUS, TEMPERATURE_WEIGHT,
    VEGETATION_WEIGHT, WIND_WEIGHT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of drivers attached to a prediction
pub const MAX_DRIVERS: usize = 3;

/// Significance threshold on each factor's badness axis
pub const SIGNIFICANCE_THRESHOLD: f32 = 0.6;

/// Fixed label set for risk drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverLabel {
    HighTemperature,
    StrongWinds,
    LowHumidity,
    DryVegetation,
    HeatWindInteraction,
    /// Sentinel emitted when no factor crosses the significance threshold
    NormalConditions,
}

impl DriverLabel {
    /// Human-readable driver name
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverLabel::HighTemperature => "High Temperature",
            DriverLabel::StrongWinds => "Strong Winds",
            DriverLabel::LowHumidity => "Low Humidity",
            DriverLabel::DryVegetation => "Dry Vegetation",
            DriverLabel::HeatWindInteraction => "Heat+Wind Interaction",
            DriverLabel::NormalConditions => "Normal Conditions",
        }
    }
}

impl fmt::Display for DriverLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributing factor with its score contribution magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub label: DriverLabel,
    pub magnitude: f32,
}

/// Rank the factors materially elevating the risk score
///
/// Candidates are gathered in fixed enumeration order (temperature, wind,
/// humidity, vegetation, interaction), sorted by magnitude descending with a
/// stable sort (ties keep enumeration order), and truncated to the top 3.
/// Never returns an empty sequence: when no factor qualifies, the single
/// `NormalConditions` sentinel is returned.
pub fn rank_drivers(n: &NormalizedFeatures) -> Vec<Driver> {
    let mut candidates: Vec<Driver> = Vec::with_capacity(5);

    if n.temperature > SIGNIFICANCE_THRESHOLD {
        candidates.push(Driver {
            label: DriverLabel::HighTemperature,
            magnitude: TEMPERATURE_WEIGHT * n.temperature,
        });
    }
    if n.wind_speed > SIGNIFICANCE_THRESHOLD {
        candidates.push(Driver {
            label: DriverLabel::StrongWinds,
            magnitude: WIND_WEIGHT * n.wind_speed,
        });
    }
    let air_dryness = 1.0 - n.humidity;
    if air_dryness > SIGNIFICANCE_THRESHOLD {
        candidates.push(Driver {
            label: DriverLabel::LowHumidity,
            magnitude: HUMIDITY_WEIGHT * air_dryness,
        });
    }
    let fuel_dryness = 1.0 - n.vegetation_moisture;
    if fuel_dryness > SIGNIFICANCE_THRESHOLD {
        candidates.push(Driver {
            label: DriverLabel::DryVegetation,
            magnitude: VEGETATION_WEIGHT * fuel_dryness,
        });
    }
    if interaction_applies(n) {
        candidates.push(Driver {
            label: DriverLabel::HeatWindInteraction,
            magnitude: INTERACTION_BONUS,
        });
    }

    if candidates.is_empty() {
        return vec![Driver {
            label: DriverLabel::NormalConditions,
            magnitude: 0.0,
        }];
    }

    // Stable sort: equal magnitudes keep enumeration order
    candidates.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    candidates.truncate(MAX_DRIVERS);
    candidates
}
