//! Temporal robustness validation under seasonal distribution shift
//!
//! Generates seasonally-biased synthetic weather: a sinusoidal model shifts
//! mean temperature and humidity by calendar month, with a designated fire
//! season of elevated baseline temperature, reduced humidity, higher wind
//! variance, and drier vegetation. The predictor is conceptually calibrated
//! on the non-fire-season months and evaluated on the fire-season window,
//! modeling the gap between training conditions and deployment conditions.

use crate::eval::metrics::ConfusionMatrix;
use crate::eval::synthetic::{ground_truth_label, LabeledSample, FIRE_LABEL_THRESHOLD};
use crate::features::FeatureVector;
use crate::predictor::EnsemblePredictor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

/// Month abbreviations, index 0 = January
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar window of elevated baseline risk (Jun-Oct, month indices)
pub const FIRE_SEASON: RangeInclusive<usize> = 5..=9;

/// First month of the held-out evaluation window (Sep-Dec)
pub const EVALUATION_SPLIT_MONTH: usize = 8;

/// Minimum accuracy required on the fire-season evaluation window
pub const ACCURACY_BAR: f32 = 0.9;

/// One seasonal sample tagged with its calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalSample {
    pub sample: LabeledSample,
    pub month: usize,
}

/// Results of the temporal robustness check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalReport {
    /// Samples in the historical calibration window (Jan-Aug)
    pub train_samples: usize,
    /// Samples in the future evaluation window (Sep-Dec)
    pub eval_samples: usize,
    pub confusion_matrix: ConfusionMatrix,
    pub accuracy: f32,
    pub precision: f32,
    pub recall: f32,
    /// True when accuracy clears the fixed robustness bar
    pub passed: bool,
}

/// Draw a gaussian value via the Box-Muller transform
///
/// Local helper rather than a distribution crate: two uniform draws from the
/// caller's seeded generator keep the dataset fully reproducible.
fn gauss<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1: f32 = rng.random_range(f32::EPSILON..1.0);
    let u2: f32 = rng.random_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    mean + std_dev * z
}

/// Draw synthetic weather conditions for a calendar month
///
/// Baselines follow a yearly sinusoid (temperature 15-30 °C, humidity
/// 40-80 %); fire-season months add +10 °C, drop humidity by 30 points,
/// widen the wind range, and dry out vegetation.
pub fn seasonal_conditions<R: Rng>(month: usize, rng: &mut R) -> FeatureVector {
    let is_fire_season = FIRE_SEASON.contains(&month);
    let phase = month as f32 / 12.0 * TAU;

    let mut base_temperature = 15.0 + 15.0 * phase.sin();
    if is_fire_season {
        base_temperature += 10.0;
    }

    let mut base_humidity = 60.0 + 20.0 * phase.cos();
    if is_fire_season {
        base_humidity -= 30.0;
    }

    let temperature = gauss(rng, base_temperature, 5.0).clamp(0.0, 50.0);
    let humidity = gauss(rng, base_humidity, 10.0).clamp(0.0, 100.0);

    // Higher wind variance during fire season
    let max_wind = if is_fire_season { 100.0 } else { 60.0 };
    let wind_speed = rng.random_range(0.0..max_wind);

    let vegetation_moisture = if is_fire_season {
        rng.random_range(0.1..0.9)
    } else {
        rng.random_range(0.4..1.0)
    };

    FeatureVector::new(temperature, humidity, wind_speed, vegetation_moisture)
}

/// Generate a reproducible year of seasonal samples, `per_month` each month
pub fn generate_seasonal_dataset(per_month: usize, seed: u64) -> Vec<SeasonalSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(per_month * MONTHS.len());
    for month in 0..MONTHS.len() {
        for _ in 0..per_month {
            let features = seasonal_conditions(month, &mut rng);
            samples.push(SeasonalSample {
                sample: LabeledSample {
                    features,
                    fire: ground_truth_label(&features),
                },
                month,
            });
        }
    }
    samples
}

/// Run the temporal robustness check
///
/// Splits the seasonal year at the evaluation month: Jan-Aug plays the role
/// of historical calibration data, Sep-Dec (the peak of fire season and its
/// tail) is the held-out deployment window the predictor is scored on.
pub fn validate_temporal(
    predictor: &EnsemblePredictor,
    per_month: usize,
    seed: u64,
) -> TemporalReport {
    let dataset = generate_seasonal_dataset(per_month, seed);
    let (train, eval): (Vec<&SeasonalSample>, Vec<&SeasonalSample>) = dataset
        .iter()
        .partition(|s| s.month < EVALUATION_SPLIT_MONTH);

    let mut matrix = ConfusionMatrix::default();
    for entry in &eval {
        let predicted = predictor.score(&entry.sample.features) > FIRE_LABEL_THRESHOLD;
        matrix.record(entry.sample.fire, predicted);
    }

    let accuracy = matrix.accuracy();
    TemporalReport {
        train_samples: train.len(),
        eval_samples: eval.len(),
        confusion_matrix: matrix,
        accuracy,
        precision: matrix.precision(),
        recall: matrix.recall(),
        passed: accuracy > ACCURACY_BAR,
    }
}
