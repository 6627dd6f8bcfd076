//! Evaluation determinism suite
//!
//! Ensures calibration results are reproducible: fixed-seed synthetic
//! datasets, idempotent threshold sweeps, deterministic fallback scoring,
//! and a stable temporal robustness verdict.

use fire_risk_core::eval::synthetic::{generate_dataset, FIRE_LABEL_THRESHOLD};
use fire_risk_core::eval::temporal::validate_temporal;
use fire_risk_core::eval::{best_threshold, evaluate, sweep_thresholds, CANDIDATE_THRESHOLDS};
use fire_risk_core::{
    EnsemblePredictor, FallbackMode, FeatureVector, LinearRegressionArtifact, ModelState,
};

#[test]
fn test_threshold_sweep_is_reproducible_end_to_end() {
    let predictor = EnsemblePredictor::heuristic_only();

    let run = || {
        let samples = generate_dataset(2000, 1234);
        let sweep = sweep_thresholds(&predictor, &samples);
        let best = best_threshold(&sweep).expect("non-empty sweep").threshold;
        (sweep, best)
    };

    let (first_sweep, first_best) = run();
    let (second_sweep, second_best) = run();

    assert_eq!(first_sweep.len(), CANDIDATE_THRESHOLDS.len());
    for (a, b) in first_sweep.iter().zip(second_sweep.iter()) {
        assert_eq!(a.confusion_matrix, b.confusion_matrix);
    }
    assert_eq!(first_best, second_best);
}

#[test]
fn test_best_threshold_matches_label_threshold_for_exact_scorer() {
    // Scoring with the ground-truth formula itself: the sweep should select
    // the threshold closest to the labeling decision point
    let predictor = EnsemblePredictor::heuristic_only();
    let samples = generate_dataset(2000, 99);
    let sweep = sweep_thresholds(&predictor, &samples);
    let best = best_threshold(&sweep).expect("non-empty sweep");

    assert_eq!(best.threshold, FIRE_LABEL_THRESHOLD);
    assert!(best.confusion_matrix.f1_score() > 0.99);
}

#[test]
fn test_evaluation_report_is_stable() {
    let predictor = EnsemblePredictor::heuristic_only();
    let samples = generate_dataset(1000, 77);

    let a = evaluate(&predictor, &samples, FIRE_LABEL_THRESHOLD);
    let b = evaluate(&predictor, &samples, FIRE_LABEL_THRESHOLD);

    assert_eq!(a.confusion_matrix, b.confusion_matrix);
    assert_eq!(a.accuracy, b.accuracy);
    assert_eq!(a.f1_score, b.f1_score);
}

#[test]
fn test_noise_mode_never_used_for_deterministic_comparison() {
    // Deterministic mode: repeated scoring of the same input is bit-stable
    let predictor = EnsemblePredictor::heuristic_only();
    let raw = FeatureVector::new(41.0, 30.0, 75.0, 0.2);
    let first = predictor.score(&raw);
    for _ in 0..50 {
        assert_eq!(predictor.score(&raw), first);
    }

    // Audit mode: noise is visible on repeated calls
    let noisy = EnsemblePredictor::heuristic_only().with_fallback_mode(FallbackMode::SimulatedNoise);
    let raw = FeatureVector::new(25.0, 50.0, 40.0, 0.3);
    let scores: Vec<f32> = (0..50).map(|_| noisy.score(&raw)).collect();
    assert!(
        scores.iter().any(|s| (s - scores[0]).abs() > f32::EPSILON),
        "simulated noise mode should not be bit-stable"
    );
}

#[test]
fn test_temporal_validation_passes_and_is_reproducible() {
    let predictor = EnsemblePredictor::heuristic_only();

    let a = validate_temporal(&predictor, 100, 2024);
    let b = validate_temporal(&predictor, 100, 2024);

    assert!(a.passed, "accuracy was {}", a.accuracy);
    assert_eq!(a.confusion_matrix, b.confusion_matrix);
    assert_eq!(a.eval_samples, 400);
}

#[test]
fn test_loaded_linear_model_close_to_ground_truth() {
    // A fitted artifact expressed over RAW features: 40/50·t − 30/100·h +
    // 20/100·w − 30·v + 40 reproduces the linear ground truth (minus the
    // interaction bonus), so evaluation accuracy should be high but the
    // interaction cases keep it below perfect recall at the label threshold.
    let artifact = LinearRegressionArtifact {
        name: "linear-fit".to_owned(),
        coefficients: [0.8, -0.3, 0.2, -30.0],
        intercept: 40.0,
    };
    let predictor = EnsemblePredictor::new(ModelState::Loaded(Box::new(artifact)));
    let samples = generate_dataset(2000, 55);
    let report = evaluate(&predictor, &samples, FIRE_LABEL_THRESHOLD);

    assert_eq!(report.model, "linear-fit");
    assert!(report.accuracy > 0.95, "accuracy was {}", report.accuracy);
}
