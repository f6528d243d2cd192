//! Threshold-derived solubility labels.
//!
//! The binary label is a pure function of the regressor's *prediction*, not
//! of the measured target: predicted log-solubility is inverted to linear
//! molar solubility and compared against a fixed concentration threshold.
//! Classifier quality is therefore bounded by regressor quality; the
//! prediction artifact keeps the measured target alongside the derived
//! label so both comparisons stay possible.

/// Default solubility threshold in mol/L.
pub const SOLUBILITY_THRESHOLD_MOLAR: f64 = 0.1;

/// Convert predicted log10 solubility to linear molar solubility.
pub fn linear_solubility(pred_log_s: f64) -> f64 {
    10f64.powf(pred_log_s)
}

/// Derive binary labels from predicted log-solubility values.
///
/// A compound is soluble iff its linear solubility is greater than *or
/// equal to* the threshold: the boundary itself counts as soluble.
pub fn derive_labels(pred_log_s: &[f64], threshold_molar: f64) -> Vec<bool> {
    pred_log_s
        .iter()
        .map(|&p| linear_solubility(p) >= threshold_molar)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_log_transform() {
        assert!((linear_solubility(0.0) - 1.0).abs() < 1e-12);
        assert!((linear_solubility(-1.0) - 0.1).abs() < 1e-12);
        assert!((linear_solubility(-3.0) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn boundary_is_soluble() {
        // 10^0 == 1.0 exactly: at-threshold counts as soluble
        let labels = derive_labels(&[0.0], 1.0);
        assert_eq!(labels, vec![true]);

        // and the slightest shortfall is not
        let labels = derive_labels(&[-1e-9], 1.0);
        assert_eq!(labels, vec![false]);
    }

    #[test]
    fn above_and_below_threshold() {
        let labels = derive_labels(&[-0.5, -1.5, 0.2], 0.1);
        assert_eq!(labels, vec![true, false, true]);
    }

    #[test]
    fn custom_threshold() {
        let labels = derive_labels(&[-2.0, -4.0], 1e-3);
        assert_eq!(labels, vec![true, false]);
    }
}
