//! Regression and classification evaluation metrics.

use std::fmt::Write as _;

use crate::error::{AquasolError, Result};

fn check_pair_lengths(a: usize, b: usize) -> Result<()> {
    if a == 0 {
        return Err(AquasolError::InvalidInput("empty vectors".into()));
    }
    if a != b {
        return Err(AquasolError::InvalidInput(format!(
            "length mismatch: {a} != {b}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Regression
// ---------------------------------------------------------------------------

/// Mean squared error.
///
/// # Errors
///
/// Returns an error if the slices are empty or have different lengths.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair_lengths(actual.len(), predicted.len())?;
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Constant actual values yield 0.0 rather than a division by zero.
///
/// # Errors
///
/// Returns an error if the slices are empty or have different lengths.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair_lengths(actual.len(), predicted.len())?;
    let mean: f64 = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(1.0 - ss_res / ss_tot)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Row-major confusion matrix: entry `(actual, predicted)`.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Build from actual and predicted label vectors. `n_classes` is
    /// inferred from the maximum label when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or have different lengths.
    pub fn from_labels(
        actual: &[usize],
        predicted: &[usize],
        n_classes: Option<usize>,
    ) -> Result<Self> {
        check_pair_lengths(actual.len(), predicted.len())?;
        let nc = n_classes.unwrap_or_else(|| {
            let max_a = actual.iter().copied().max().unwrap_or(0);
            let max_p = predicted.iter().copied().max().unwrap_or(0);
            max_a.max(max_p) + 1
        });
        let mut counts = vec![0usize; nc * nc];
        for (&a, &p) in actual.iter().zip(predicted) {
            if a < nc && p < nc {
                counts[a * nc + p] += 1;
            }
        }
        Ok(Self {
            counts,
            n_classes: nc,
        })
    }

    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual * self.n_classes + predicted]
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of samples whose actual class is `class`.
    pub fn support(&self, class: usize) -> usize {
        (0..self.n_classes).map(|p| self.get(class, p)).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|c| self.get(c, c)).sum();
        correct as f64 / total as f64
    }

    /// `TP / (TP + FP)`; 0.0 when nothing was predicted as `class`.
    pub fn precision(&self, class: usize) -> f64 {
        let tp = self.get(class, class);
        let predicted: usize = (0..self.n_classes).map(|a| self.get(a, class)).sum();
        if predicted == 0 {
            0.0
        } else {
            tp as f64 / predicted as f64
        }
    }

    /// `TP / (TP + FN)`; 0.0 when `class` has no support.
    pub fn recall(&self, class: usize) -> f64 {
        let tp = self.get(class, class);
        let support = self.support(class);
        if support == 0 {
            0.0
        } else {
            tp as f64 / support as f64
        }
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self, class: usize) -> f64 {
        let p = self.precision(class);
        let r = self.recall(class);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Per-class precision/recall/F1 table plus accuracy, one class per line.
///
/// `class_names[i]` labels class `i`; classes beyond the provided names fall
/// back to their index.
pub fn classification_report(cm: &ConfusionMatrix, class_names: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>12}  {:>9}  {:>9}  {:>9}  {:>9}",
        "", "precision", "recall", "f1-score", "support"
    );
    for class in 0..cm.n_classes() {
        let name = class_names
            .get(class)
            .map(|n| n.to_string())
            .unwrap_or_else(|| class.to_string());
        let _ = writeln!(
            out,
            "{:>12}  {:>9.3}  {:>9.3}  {:>9.3}  {:>9}",
            name,
            cm.precision(class),
            cm.recall(class),
            cm.f1(class),
            cm.support(class)
        );
    }
    let _ = writeln!(out, "{:>12}  {:>42.3}", "accuracy", cm.accuracy());
    out
}
