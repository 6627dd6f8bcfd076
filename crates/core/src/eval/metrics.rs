//! Confusion matrix and derived classification metrics
//!
//! Derived metrics are pure functions of the four counts. Degenerate
//! denominators (a threshold that predicts nothing positive, for example)
//! yield 0 rather than an error.

use serde::{Deserialize, Serialize};

/// Binary classification outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u32,
    pub false_positives: u32,
    pub true_negatives: u32,
    pub false_negatives: u32,
}

impl ConfusionMatrix {
    /// Matrix for a single (ground truth, prediction) outcome
    pub fn from_outcome(truth: bool, predicted: bool) -> Self {
        let mut matrix = ConfusionMatrix::default();
        matrix.record(truth, predicted);
        matrix
    }

    /// Tally one labeled prediction
    pub fn record(&mut self, truth: bool, predicted: bool) {
        match (truth, predicted) {
            (true, true) => self.true_positives += 1,
            (false, true) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (true, false) => self.false_negatives += 1,
        };
    }

    /// Combine two matrices (used as the rayon reduce step)
    pub fn merge(self, other: Self) -> Self {
        ConfusionMatrix {
            true_positives: self.true_positives + other.true_positives,
            false_positives: self.false_positives + other.false_positives,
            true_negatives: self.true_negatives + other.true_negatives,
            false_negatives: self.false_negatives + other.false_negatives,
        }
    }

    /// Total number of samples tallied
    pub fn total(&self) -> u32 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct predictions, 0 when empty
    pub fn accuracy(&self) -> f32 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// TP / (TP + FP), 0 when nothing was predicted positive
    pub fn precision(&self) -> f32 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN), 0 when no positives exist
    pub fn recall(&self) -> f32 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall, 0 when both are 0
    pub fn f1_score(&self) -> f32 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }

    /// FP / (FP + TN), 0 when no negatives exist
    pub fn false_positive_rate(&self) -> f32 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }
}

fn ratio(numerator: u32, denominator: u32) -> f32 {
    if denominator > 0 {
        numerator as f32 / denominator as f32
    } else {
        0.0
    }
}
