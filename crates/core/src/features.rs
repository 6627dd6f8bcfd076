//! Raw environmental measurements and their normalized [0,1] form
//!
//! Out-of-domain input is clamped, never rejected. Clamping is observable
//! through a warning but is not an error: a malformed reading must still
//! produce a usable score.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound of the nominal temperature domain (°C)
pub const TEMPERATURE_SCALE: f32 = 50.0;
/// Upper bound of the nominal humidity domain (%)
pub const HUMIDITY_SCALE: f32 = 100.0;
/// Upper bound of the nominal wind speed domain (km/h)
pub const WIND_SCALE: f32 = 100.0;

/// Raw environmental measurements for one location
///
/// Nominal domains: temperature [0,50] °C, humidity [0,100] %,
/// wind speed [0,100] km/h, vegetation moisture [0,1] fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub temperature: f32,         // °C
    pub humidity: f32,            // %
    pub wind_speed: f32,          // km/h
    pub vegetation_moisture: f32, // fraction 0-1
}

impl FeatureVector {
    /// Create a feature vector from raw measurements
    pub fn new(temperature: f32, humidity: f32, wind_speed: f32, vegetation_moisture: f32) -> Self {
        FeatureVector {
            temperature,
            humidity,
            wind_speed,
            vegetation_moisture,
        }
    }

    /// Raw values in the fixed model input order
    /// (temperature, humidity, wind speed, vegetation moisture)
    pub fn as_model_input(&self) -> [f32; 4] {
        [
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.vegetation_moisture,
        ]
    }
}

/// Features rescaled into [0,1], derived deterministically from a [`FeatureVector`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeatures {
    pub temperature: f32,
    pub humidity: f32,
    pub wind_speed: f32,
    pub vegetation_moisture: f32,
}

impl NormalizedFeatures {
    /// Normalize raw measurements: `clip(raw / scale, 0, 1)` per field
    ///
    /// Scales are 50 (temperature), 100 (humidity), 100 (wind speed);
    /// vegetation moisture is already a fraction and passes through.
    pub fn from_raw(raw: &FeatureVector) -> Self {
        NormalizedFeatures {
            temperature: normalize_component("temperature", raw.temperature, TEMPERATURE_SCALE),
            humidity: normalize_component("humidity", raw.humidity, HUMIDITY_SCALE),
            wind_speed: normalize_component("wind_speed", raw.wind_speed, WIND_SCALE),
            vegetation_moisture: normalize_component(
                "vegetation_moisture",
                raw.vegetation_moisture,
                1.0,
            ),
        }
    }
}

/// Rescale one measurement into [0,1], warning when the nominal domain is exceeded
fn normalize_component(name: &str, raw: f32, scale: f32) -> f32 {
    if !(0.0..=scale).contains(&raw) {
        warn!(
            feature = name,
            value = f64::from(raw),
            max = f64::from(scale),
            "measurement outside nominal domain, clamping"
        );
    }
    (raw / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_values_rescale() {
        let raw = FeatureVector::new(25.0, 50.0, 40.0, 0.3);
        let n = NormalizedFeatures::from_raw(&raw);

        assert!((n.temperature - 0.5).abs() < 1e-6);
        assert!((n.humidity - 0.5).abs() < 1e-6);
        assert!((n.wind_speed - 0.4).abs() < 1e-6);
        assert!((n.vegetation_moisture - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_domain_clamps_high() {
        // Way out of bounds on every axis
        let raw = FeatureVector::new(100.0, 250.0, 200.0, 2.0);
        let n = NormalizedFeatures::from_raw(&raw);

        assert_eq!(n.temperature, 1.0);
        assert_eq!(n.humidity, 1.0);
        assert_eq!(n.wind_speed, 1.0);
        assert_eq!(n.vegetation_moisture, 1.0);
    }

    #[test]
    fn test_out_of_domain_clamps_low() {
        let raw = FeatureVector::new(-50.0, -10.0, -100.0, -1.0);
        let n = NormalizedFeatures::from_raw(&raw);

        assert_eq!(n.temperature, 0.0);
        assert_eq!(n.humidity, 0.0);
        assert_eq!(n.wind_speed, 0.0);
        assert_eq!(n.vegetation_moisture, 0.0);
    }

    #[test]
    fn test_model_input_order_is_fixed() {
        let raw = FeatureVector::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(raw.as_model_input(), [1.0, 2.0, 3.0, 4.0]);
    }
}
