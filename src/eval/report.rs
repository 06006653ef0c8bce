//! Confusion matrix and per-class metrics over the tier label set. The
//! unknown bucket is part of the label set even though no ground truth maps
//! to it, so stray predictor labels stay visible in the report.

use crate::risk::{Prediction, RiskTier};
use std::fmt;

/// Label order: tiers first, unknown last
pub const CLASS_LABELS: [&str; 4] = ["good", "warning", "bad", "unknown"];

const UNKNOWN: usize = 3;

fn tier_index(tier: RiskTier) -> usize {
    match tier {
        RiskTier::Good => 0,
        RiskTier::Warning => 1,
        RiskTier::Bad => 2,
    }
}

fn prediction_index(prediction: Prediction) -> usize {
    match prediction {
        Prediction::Tier(tier) => tier_index(tier),
        Prediction::Unknown => UNKNOWN,
    }
}

/// Rows are ground truth, columns are predictions
#[derive(Debug, Clone, Default)]
pub struct ConfusionMatrix {
    counts: [[usize; CLASS_LABELS.len()]; CLASS_LABELS.len()],
}

impl ConfusionMatrix {
    pub fn record(&mut self, truth: RiskTier, predicted: Prediction) {
        self.counts[tier_index(truth)][prediction_index(predicted)] += 1;
    }

    pub fn count(&self, truth: usize, predicted: usize) -> usize {
        self.counts[truth][predicted]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    fn row_total(&self, truth: usize) -> usize {
        self.counts[truth].iter().sum()
    }

    fn column_total(&self, predicted: usize) -> usize {
        self.counts.iter().map(|row| row[predicted]).sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "")?;
        for label in CLASS_LABELS {
            write!(f, " {label:>9}")?;
        }
        writeln!(f)?;
        for (t, label) in CLASS_LABELS.iter().enumerate() {
            write!(f, "{label:>10}")?;
            for p in 0..CLASS_LABELS.len() {
                write!(f, " {:>9}", self.counts[t][p])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Precision/recall/F1/support for one class
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    pub label: &'static str,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ClassificationReport {
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Self {
        let mut classes = Vec::with_capacity(CLASS_LABELS.len());
        let mut correct = 0;
        for (i, label) in CLASS_LABELS.iter().enumerate() {
            let tp = matrix.count(i, i);
            correct += tp;
            let precision = ratio(tp, matrix.column_total(i));
            let recall = ratio(tp, matrix.row_total(i));
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            classes.push(ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support: matrix.row_total(i),
            });
        }
        let total = matrix.total();
        Self {
            classes,
            accuracy: ratio(correct, total),
            total,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>10} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>10} {:>32.2} {:>10}",
            "accuracy", self.accuracy, self.total
        )?;
        Ok(())
    }
}
