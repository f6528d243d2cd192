//! Bagged tree ensembles.
//!
//! Both models draw a bootstrap sample and a random feature subset per tree
//! (decorrelated weak learners), then aggregate: the regressor averages leaf
//! values, the classifier takes a majority vote. Training is deterministic
//! for a fixed seed and tree count.
//!
//! Data is flat row-major `&[f64]` with an `n_features` parameter.

use serde::{Deserialize, Serialize};

use crate::error::{AquasolError, Result};
use crate::tree::{ClassificationTree, ClsNode, RegNode, RegressionTree};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Ensemble hyper-parameters shared by both model variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Maximum depth per tree.
    pub max_depth: usize,
    /// Features considered per tree; `None` defaults to `sqrt(n_features)`.
    pub max_features: Option<usize>,
    /// Random seed for bootstrap and feature bagging.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 12,
            max_features: None,
            seed: 42,
        }
    }
}

fn check_fit_input(
    data: &[f64],
    n_features: usize,
    n_targets: usize,
    config: &ForestConfig,
) -> Result<usize> {
    if data.is_empty() {
        return Err(AquasolError::InvalidInput("empty data".into()));
    }
    if n_features == 0 {
        return Err(AquasolError::InvalidInput("n_features must be > 0".into()));
    }
    if data.len() % n_features != 0 {
        return Err(AquasolError::InvalidInput(format!(
            "data length {} not divisible by n_features {}",
            data.len(),
            n_features
        )));
    }
    let n_samples = data.len() / n_features;
    if n_targets != n_samples {
        return Err(AquasolError::InvalidInput(format!(
            "targets length {n_targets} != n_samples {n_samples}"
        )));
    }
    if config.n_trees == 0 {
        return Err(AquasolError::InvalidInput("n_trees must be > 0".into()));
    }
    Ok(n_samples)
}

// ---------------------------------------------------------------------------
// Regressor
// ---------------------------------------------------------------------------

/// Bagged ensemble regressor (mean of tree predictions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestRegressor {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl ForestRegressor {
    /// Fit the ensemble on flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, inconsistent dimensions, or a zero
    /// tree count.
    pub fn fit(
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        config: &ForestConfig,
    ) -> Result<Self> {
        let n_samples = check_fit_input(data, n_features, targets.len(), config)?;
        let max_features = config
            .max_features
            .unwrap_or_else(|| isqrt(n_features).max(1));

        let mut rng = LcgRng::new(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let sample: Vec<usize> = (0..n_samples)
                .map(|_| rng.next_bounded(n_samples as u64) as usize)
                .collect();
            let features = feature_subset(&mut rng, n_features, max_features);
            trees.push(RegressionTree::fit_with(
                data,
                n_features,
                targets,
                &sample,
                &features,
                config.max_depth,
            )?);
        }

        Ok(Self { trees, n_features })
    }

    /// Mean prediction across all trees for one sample.
    pub fn predict(&self, sample: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(sample)).sum();
        sum / self.trees.len() as f64
    }

    /// Predictions for a flat row-major batch.
    pub fn predict_batch(&self, data: &[f64]) -> Vec<f64> {
        data.chunks(self.n_features)
            .map(|row| self.predict(row))
            .collect()
    }

    /// Normalized frequency of each feature across split nodes.
    pub fn feature_importance(&self) -> Vec<f64> {
        let mut counts = vec![0usize; self.n_features];
        let mut total = 0usize;
        for tree in &self.trees {
            for node in tree.nodes() {
                if let RegNode::Split { feature, .. } = node {
                    counts[*feature] += 1;
                    total += 1;
                }
            }
        }
        normalize_counts(counts, total)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Bagged ensemble classifier (majority vote).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    trees: Vec<ClassificationTree>,
    n_features: usize,
    n_classes: usize,
}

impl ForestClassifier {
    /// Fit the ensemble on flat row-major data with class labels.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, inconsistent dimensions, or a zero
    /// tree count.
    pub fn fit(
        data: &[f64],
        n_features: usize,
        labels: &[usize],
        config: &ForestConfig,
    ) -> Result<Self> {
        let n_samples = check_fit_input(data, n_features, labels.len(), config)?;
        let n_classes = labels.iter().copied().max().map_or(0, |m| m + 1);
        let max_features = config
            .max_features
            .unwrap_or_else(|| isqrt(n_features).max(1));

        let mut rng = LcgRng::new(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let sample: Vec<usize> = (0..n_samples)
                .map(|_| rng.next_bounded(n_samples as u64) as usize)
                .collect();
            let features = feature_subset(&mut rng, n_features, max_features);
            trees.push(ClassificationTree::fit_with(
                data,
                n_features,
                labels,
                &sample,
                &features,
                config.max_depth,
            )?);
        }

        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }

    /// Majority-vote class for one sample.
    pub fn predict(&self, sample: &[f64]) -> usize {
        let mut votes = vec![0usize; self.n_classes.max(1)];
        for tree in &self.trees {
            let class = tree.predict(sample);
            if class < votes.len() {
                votes[class] += 1;
            }
        }
        votes
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| v)
            .map(|(class, _)| class)
            .unwrap_or(0)
    }

    /// Predictions for a flat row-major batch.
    pub fn predict_batch(&self, data: &[f64]) -> Vec<usize> {
        data.chunks(self.n_features)
            .map(|row| self.predict(row))
            .collect()
    }

    /// Normalized frequency of each feature across split nodes.
    pub fn feature_importance(&self) -> Vec<f64> {
        let mut counts = vec![0usize; self.n_features];
        let mut total = 0usize;
        for tree in &self.trees {
            for node in tree.nodes() {
                if let ClsNode::Split { feature, .. } = node {
                    counts[*feature] += 1;
                    total += 1;
                }
            }
        }
        normalize_counts(counts, total)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

// ---------------------------------------------------------------------------
// PRNG and helpers (private per-module; same constants as split.rs)
// ---------------------------------------------------------------------------

struct LcgRng {
    state: u64,
}

impl LcgRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_bounded(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

fn isqrt(n: usize) -> usize {
    (n as f64).sqrt() as usize
}

/// Partial Fisher-Yates: `count` distinct feature indices.
fn feature_subset(rng: &mut LcgRng, n_features: usize, count: usize) -> Vec<usize> {
    let count = count.min(n_features);
    let mut pool: Vec<usize> = (0..n_features).collect();
    for i in 0..count {
        let j = i + rng.next_bounded((n_features - i) as u64) as usize;
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

fn normalize_counts(counts: Vec<usize>, total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .into_iter()
        .map(|c| c as f64 / total as f64)
        .collect()
}
