//! Feature standardization as a fitted, reusable transform.
//!
//! Statistics come from the training split only; the identical transform is
//! applied to held-out data and later full-dataset inference without
//! refitting.

use serde::{Deserialize, Serialize};

use crate::error::{AquasolError, Result};

/// Column-wise z-score transform with stored statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit per-column mean and standard deviation on a flat row-major
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data or inconsistent dimensions.
    pub fn fit(data: &[f64], n_cols: usize) -> Result<Self> {
        if n_cols == 0 {
            return Err(AquasolError::InvalidInput("n_cols must be > 0".into()));
        }
        if data.is_empty() {
            return Err(AquasolError::InvalidInput("empty data".into()));
        }
        if data.len() % n_cols != 0 {
            return Err(AquasolError::InvalidInput(format!(
                "data length {} not divisible by n_cols {}",
                data.len(),
                n_cols
            )));
        }

        let n_rows = data.len() / n_cols;
        let nf = n_rows as f64;
        let mut means = vec![0.0; n_cols];
        let mut stds = vec![0.0; n_cols];

        for col in 0..n_cols {
            let mean: f64 = (0..n_rows).map(|r| data[r * n_cols + col]).sum::<f64>() / nf;
            let var: f64 = (0..n_rows)
                .map(|r| (data[r * n_cols + col] - mean).powi(2))
                .sum::<f64>()
                / nf;
            means[col] = mean;
            stds[col] = var.sqrt();
        }

        Ok(StandardScaler { means, stds })
    }

    /// Apply the stored transform in-place. Constant columns (std == 0)
    /// map to 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the data width disagrees with the fitted width.
    pub fn transform(&self, data: &mut [f64]) -> Result<()> {
        let n_cols = self.means.len();
        if data.len() % n_cols != 0 {
            return Err(AquasolError::InvalidInput(format!(
                "data length {} not divisible by fitted width {}",
                data.len(),
                n_cols
            )));
        }
        for (i, v) in data.iter_mut().enumerate() {
            let col = i % n_cols;
            *v = if self.stds[col] == 0.0 {
                0.0
            } else {
                (*v - self.means[col]) / self.stds[col]
            };
        }
        Ok(())
    }

    /// Number of feature columns the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Stored per-column means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Stored per-column standard deviations.
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }
}
