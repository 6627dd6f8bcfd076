//! Ordinal risk level classification over fixed score bands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk score band constants for the four severity levels.
///
/// These boundaries are used consistently across classification, calibration
/// output, and tests. Note: Rust `Range` types use **inclusive lower bound and
/// exclusive upper bound** [a, b), so boundary scores belong to the higher
/// band (a score of exactly 30.0 is Moderate, exactly 80.0 is Extreme).
pub mod score_bands {
    use std::ops::{Range, RangeInclusive};

    /// "Low" risk band `[0.0, 30.0)`
    pub const LOW: Range<f32> = 0.0..30.0;

    /// "Moderate" risk band `[30.0, 50.0)`
    pub const MODERATE: Range<f32> = 30.0..50.0;

    /// "High" risk band `[50.0, 80.0)`
    pub const HIGH: Range<f32> = 50.0..80.0;

    /// "Extreme" risk band `[80.0, 100.0]` (closed: 100 is a valid score)
    pub const EXTREME: RangeInclusive<f32> = 80.0..=100.0;
}

/// Ordinal wildfire risk severity level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    /// Classify a 0-100 risk score into its severity level
    ///
    /// Total over the valid score range; anything at or above the Extreme
    /// lower bound classifies as Extreme.
    pub fn from_score(score: f32) -> Self {
        match score {
            s if score_bands::LOW.contains(&s) => RiskLevel::Low,
            s if score_bands::MODERATE.contains(&s) => RiskLevel::Moderate,
            s if score_bands::HIGH.contains(&s) => RiskLevel::High,
            _ => RiskLevel::Extreme,
        }
    }

    /// Level name as displayed to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }

    /// Dashboard display color for this level
    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#22c55e",      // Green
            RiskLevel::Moderate => "#eab308", // Yellow
            RiskLevel::High => "#f97316",     // Orange
            RiskLevel::Extreme => "#ef4444",  // Red
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_scores_belong_to_higher_band() {
        assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::Extreme);
    }

    #[test]
    fn test_just_below_boundary() {
        assert_eq!(RiskLevel::from_score(29.99), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(49.99), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(79.99), RiskLevel::High);
    }

    #[test]
    fn test_extremes_of_range() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Extreme);
    }

    #[test]
    fn test_levels_are_totally_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Extreme);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(RiskLevel::High.to_string(), "High");
        assert_eq!(RiskLevel::Extreme.color_hex(), "#ef4444");
    }
}
