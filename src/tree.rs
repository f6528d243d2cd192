//! CART decision trees over flat row-major data.
//!
//! Two variants share the same arena layout: [`RegressionTree`] splits on
//! variance reduction with mean-valued leaves, [`ClassificationTree`] splits
//! on Gini impurity with majority-class leaves. Both are the weak learners
//! of the ensembles in [`forest`](crate::forest).

use serde::{Deserialize, Serialize};

use crate::error::{AquasolError, Result};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn check_matrix(data: &[f64], n_features: usize, n_targets: usize) -> Result<()> {
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
    if data.len() / n_features != n_targets {
        return Err(AquasolError::InvalidInput(format!(
            "targets length {} != n_samples {}",
            n_targets,
            data.len() / n_features
        )));
    }
    Ok(())
}

/// Distinct sorted values of one feature over a sample subset.
fn sorted_feature_values(
    data: &[f64],
    n_features: usize,
    indices: &[usize],
    feature: usize,
) -> Vec<f64> {
    let mut values: Vec<f64> = indices
        .iter()
        .map(|&i| data[i * n_features + feature])
        .collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    values
}

fn partition(
    data: &[f64],
    n_features: usize,
    indices: &[usize],
    feature: usize,
    threshold: f64,
) -> (Vec<usize>, Vec<usize>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &i in indices {
        if data[i * n_features + feature] <= threshold {
            left.push(i);
        } else {
            right.push(i);
        }
    }
    (left, right)
}

// ---------------------------------------------------------------------------
// Regression tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum RegNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A regression tree splitting on variance reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<RegNode>,
}

impl RegressionTree {
    /// Fit on the full sample set considering every feature.
    pub fn fit(
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        max_depth: usize,
    ) -> Result<Self> {
        check_matrix(data, n_features, targets.len())?;
        let indices: Vec<usize> = (0..targets.len()).collect();
        let features: Vec<usize> = (0..n_features).collect();
        Self::fit_with(data, n_features, targets, &indices, &features, max_depth)
    }

    /// Fit on a sample subset with a restricted feature set (used by the
    /// forest for bagging).
    pub(crate) fn fit_with(
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        sample_indices: &[usize],
        candidate_features: &[usize],
        max_depth: usize,
    ) -> Result<Self> {
        if sample_indices.is_empty() {
            return Err(AquasolError::InvalidInput("empty sample set".into()));
        }
        let mut nodes = Vec::new();
        grow_regression(
            data,
            n_features,
            targets,
            sample_indices,
            candidate_features,
            max_depth,
            0,
            &mut nodes,
        );
        Ok(Self { nodes })
    }

    /// Predicted value for a single sample.
    pub fn predict(&self, sample: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                RegNode::Leaf { value } => return *value,
                RegNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub(crate) fn nodes(&self) -> &[RegNode] {
        &self.nodes
    }
}

fn mean(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

/// Sum of squared deviations from the subset mean.
fn sse(targets: &[f64], indices: &[usize]) -> f64 {
    let m = mean(targets, indices);
    indices.iter().map(|&i| (targets[i] - m).powi(2)).sum()
}

#[allow(clippy::too_many_arguments)]
fn grow_regression(
    data: &[f64],
    n_features: usize,
    targets: &[f64],
    indices: &[usize],
    candidate_features: &[usize],
    max_depth: usize,
    depth: usize,
    nodes: &mut Vec<RegNode>,
) -> usize {
    let node_mean = mean(targets, indices);

    if depth >= max_depth || indices.len() < 2 || sse(targets, indices) < 1e-12 {
        let idx = nodes.len();
        nodes.push(RegNode::Leaf { value: node_mean });
        return idx;
    }

    let Some((feature, threshold)) =
        best_regression_split(data, n_features, targets, indices, candidate_features)
    else {
        let idx = nodes.len();
        nodes.push(RegNode::Leaf { value: node_mean });
        return idx;
    };

    let (left_set, right_set) = partition(data, n_features, indices, feature, threshold);
    if left_set.is_empty() || right_set.is_empty() {
        let idx = nodes.len();
        nodes.push(RegNode::Leaf { value: node_mean });
        return idx;
    }

    let node_idx = nodes.len();
    nodes.push(RegNode::Leaf { value: 0.0 }); // placeholder until children exist

    let left = grow_regression(
        data,
        n_features,
        targets,
        &left_set,
        candidate_features,
        max_depth,
        depth + 1,
        nodes,
    );
    let right = grow_regression(
        data,
        n_features,
        targets,
        &right_set,
        candidate_features,
        max_depth,
        depth + 1,
        nodes,
    );

    nodes[node_idx] = RegNode::Split {
        feature,
        threshold,
        left,
        right,
    };
    node_idx
}

/// Best (feature, threshold) by maximal reduction of summed squared error.
fn best_regression_split(
    data: &[f64],
    n_features: usize,
    targets: &[f64],
    indices: &[usize],
    candidate_features: &[usize],
) -> Option<(usize, f64)> {
    let parent_sse = sse(targets, indices);
    let mut best: Option<(usize, f64)> = None;
    let mut best_gain = 1e-12;

    for &feature in candidate_features {
        let values = sorted_feature_values(data, n_features, indices, feature);
        if values.len() < 2 {
            continue;
        }
        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right) = partition(data, n_features, indices, feature, threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            let gain = parent_sse - sse(targets, &left) - sse(targets, &right);
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, threshold));
            }
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Classification tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum ClsNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

/// A classification tree splitting on Gini impurity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationTree {
    nodes: Vec<ClsNode>,
}

impl ClassificationTree {
    /// Fit on the full sample set considering every feature.
    pub fn fit(
        data: &[f64],
        n_features: usize,
        labels: &[usize],
        max_depth: usize,
    ) -> Result<Self> {
        check_matrix(data, n_features, labels.len())?;
        let indices: Vec<usize> = (0..labels.len()).collect();
        let features: Vec<usize> = (0..n_features).collect();
        Self::fit_with(data, n_features, labels, &indices, &features, max_depth)
    }

    pub(crate) fn fit_with(
        data: &[f64],
        n_features: usize,
        labels: &[usize],
        sample_indices: &[usize],
        candidate_features: &[usize],
        max_depth: usize,
    ) -> Result<Self> {
        if sample_indices.is_empty() {
            return Err(AquasolError::InvalidInput("empty sample set".into()));
        }
        let mut nodes = Vec::new();
        grow_classification(
            data,
            n_features,
            labels,
            sample_indices,
            candidate_features,
            max_depth,
            0,
            &mut nodes,
        );
        Ok(Self { nodes })
    }

    /// Predicted class for a single sample.
    pub fn predict(&self, sample: &[f64]) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                ClsNode::Leaf { class } => return *class,
                ClsNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub(crate) fn nodes(&self) -> &[ClsNode] {
        &self.nodes
    }
}

fn class_counts(labels: &[usize], indices: &[usize]) -> Vec<usize> {
    let max = indices.iter().map(|&i| labels[i]).max().unwrap_or(0);
    let mut counts = vec![0usize; max + 1];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    counts
}

fn majority_class(labels: &[usize], indices: &[usize]) -> usize {
    class_counts(labels, indices)
        .iter()
        .enumerate()
        .max_by_key(|&(_, &c)| c)
        .map(|(cls, _)| cls)
        .unwrap_or(0)
}

fn gini(labels: &[usize], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let n = indices.len() as f64;
    1.0 - class_counts(labels, indices)
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

fn is_pure(labels: &[usize], indices: &[usize]) -> bool {
    indices
        .windows(2)
        .all(|w| labels[w[0]] == labels[w[1]])
}

#[allow(clippy::too_many_arguments)]
fn grow_classification(
    data: &[f64],
    n_features: usize,
    labels: &[usize],
    indices: &[usize],
    candidate_features: &[usize],
    max_depth: usize,
    depth: usize,
    nodes: &mut Vec<ClsNode>,
) -> usize {
    let majority = majority_class(labels, indices);

    if depth >= max_depth || indices.len() < 2 || is_pure(labels, indices) {
        let idx = nodes.len();
        nodes.push(ClsNode::Leaf { class: majority });
        return idx;
    }

    let Some((feature, threshold)) =
        best_classification_split(data, n_features, labels, indices, candidate_features)
    else {
        let idx = nodes.len();
        nodes.push(ClsNode::Leaf { class: majority });
        return idx;
    };

    let (left_set, right_set) = partition(data, n_features, indices, feature, threshold);
    if left_set.is_empty() || right_set.is_empty() {
        let idx = nodes.len();
        nodes.push(ClsNode::Leaf { class: majority });
        return idx;
    }

    let node_idx = nodes.len();
    nodes.push(ClsNode::Leaf { class: 0 }); // placeholder until children exist

    let left = grow_classification(
        data,
        n_features,
        labels,
        &left_set,
        candidate_features,
        max_depth,
        depth + 1,
        nodes,
    );
    let right = grow_classification(
        data,
        n_features,
        labels,
        &right_set,
        candidate_features,
        max_depth,
        depth + 1,
        nodes,
    );

    nodes[node_idx] = ClsNode::Split {
        feature,
        threshold,
        left,
        right,
    };
    node_idx
}

/// Best (feature, threshold) by maximal weighted Gini reduction.
fn best_classification_split(
    data: &[f64],
    n_features: usize,
    labels: &[usize],
    indices: &[usize],
    candidate_features: &[usize],
) -> Option<(usize, f64)> {
    let n = indices.len() as f64;
    let parent = gini(labels, indices);
    let mut best: Option<(usize, f64)> = None;
    let mut best_gain = 0.0;

    for &feature in candidate_features {
        let values = sorted_feature_values(data, n_features, indices, feature);
        if values.len() < 2 {
            continue;
        }
        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right) = partition(data, n_features, indices, feature, threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            let weighted = (left.len() as f64 * gini(labels, &left)
                + right.len() as f64 * gini(labels, &right))
                / n;
            let gain = parent - weighted;
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, threshold));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_fits_step_function() {
        let data = vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
        let targets = vec![1.0, 1.0, 1.0, 5.0, 5.0, 5.0];
        let tree = RegressionTree::fit(&data, 1, &targets, 8).unwrap();
        assert!((tree.predict(&[1.5]) - 1.0).abs() < 1e-9);
        assert!((tree.predict(&[11.0]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn regression_constant_targets_single_leaf() {
        let data = vec![0.0, 1.0, 2.0, 3.0];
        let targets = vec![2.5; 4];
        let tree = RegressionTree::fit(&data, 1, &targets, 8).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert!((tree.predict(&[99.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn regression_max_depth_zero_returns_mean() {
        let data = vec![0.0, 1.0, 2.0, 3.0];
        let targets = vec![0.0, 1.0, 2.0, 3.0];
        let tree = RegressionTree::fit(&data, 1, &targets, 0).unwrap();
        assert!((tree.predict(&[0.0]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn classification_separates_classes() {
        let data = vec![0.0, 0.0, 1.0, 0.0, 10.0, 0.0, 11.0, 0.0];
        let labels = vec![0, 0, 1, 1];
        let tree = ClassificationTree::fit(&data, 2, &labels, 8).unwrap();
        assert_eq!(tree.predict(&[0.5, 0.0]), 0);
        assert_eq!(tree.predict(&[10.5, 0.0]), 1);
    }

    #[test]
    fn classification_pure_node_is_leaf() {
        let data = vec![0.0, 1.0, 2.0];
        let labels = vec![1, 1, 1];
        let tree = ClassificationTree::fit(&data, 1, &labels, 8).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.predict(&[5.0]), 1);
    }

    #[test]
    fn dimension_errors() {
        assert!(RegressionTree::fit(&[], 1, &[], 4).is_err());
        assert!(RegressionTree::fit(&[1.0, 2.0, 3.0], 2, &[0.0], 4).is_err());
        assert!(ClassificationTree::fit(&[1.0, 2.0], 1, &[0], 4).is_err());
    }

    #[test]
    fn trees_serialize_round_trip() {
        let data = vec![0.0, 1.0, 10.0, 11.0];
        let targets = vec![0.0, 0.0, 4.0, 4.0];
        let tree = RegressionTree::fit(&data, 1, &targets, 4).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        let back: RegressionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predict(&[0.5]), tree.predict(&[0.5]));
    }
}
