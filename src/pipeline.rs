//! End-to-end orchestration: ingest, featurize, model, derive, persist.
//!
//! All file locations are fixed working-directory constants; the run takes
//! a base directory so tests can point it at a scratch space.

use std::path::Path;

use crate::error::{AquasolError, Result};
use crate::forest::{ForestClassifier, ForestConfig, ForestRegressor};
use crate::io::{self, PredictionRow};
use crate::labels::{self, SOLUBILITY_THRESHOLD_MOLAR};
use crate::metrics::{classification_report, mean_squared_error, r_squared, ConfusionMatrix};
use crate::resolver::NameResolver;
use crate::scale::StandardScaler;
use crate::split::train_test_split;
use crate::table::{build_feature_table, FeatureTable, RejectionLog};

/// Source dataset, expected in the working directory.
pub const INPUT_FILE: &str = "solubility.csv";
/// Enriched feature table artifact.
pub const FEATURES_FILE: &str = "descriptors.csv";
/// Fully-annotated prediction artifact.
pub const PREDICTIONS_FILE: &str = "predictions.csv";
/// Sodium/potassium salt subset artifact.
pub const SALTS_FILE: &str = "salts.csv";
/// Persisted regressor.
pub const REGRESSOR_FILE: &str = "regressor.json";
/// Persisted feature scaler.
pub const SCALER_FILE: &str = "scaler.json";
/// Persisted classifier.
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Fixed seed shared by splitting and both ensembles.
pub const SEED: u64 = 42;
/// Held-out fraction for both the regression and classification splits.
pub const TEST_FRACTION: f64 = 0.2;

/// Run-level configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Solubility threshold in mol/L for label derivation.
    pub threshold_molar: f64,
    pub test_fraction: f64,
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold_molar: SOLUBILITY_THRESHOLD_MOLAR,
            test_fraction: TEST_FRACTION,
            forest: ForestConfig {
                seed: SEED,
                ..ForestConfig::default()
            },
        }
    }
}

/// Everything the run prints or a caller might inspect.
#[derive(Debug)]
pub struct PipelineReport {
    pub n_input: usize,
    pub n_rows: usize,
    pub rejections: RejectionLog,
    pub n_salts: usize,
    /// (mse, r2) on the regression held-out split.
    pub regression: (f64, f64),
    pub regressor_importance: Vec<f64>,
    pub classifier_accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub classification_report: String,
    /// Derived soluble count over all complete rows.
    pub n_soluble: usize,
}

/// Ingest and featurize: read the input table, build the feature table, and
/// write the enriched-table and salt-subset artifacts.
pub fn run_tabulation(
    dir: &Path,
    resolver: &dyn NameResolver,
) -> Result<(FeatureTable, RejectionLog, usize)> {
    let records = io::read_compounds(dir.join(INPUT_FILE))?;
    let (table, rejections) = build_feature_table(&records, resolver);

    io::write_feature_table(dir.join(FEATURES_FILE), &table)?;
    let salts = table.salt_rows();
    io::write_salt_subset(dir.join(SALTS_FILE), &salts)?;
    let n_salts = salts.len();

    Ok((table, rejections, n_salts))
}

/// Full pipeline: tabulation, regression, threshold-derived classification,
/// prediction artifact, persisted models.
pub fn run(dir: &Path, config: &PipelineConfig, resolver: &dyn NameResolver) -> Result<PipelineReport> {
    let (table, rejections, n_salts) = run_tabulation(dir, resolver)?;
    let n_input = table.rows.len() + rejections.len();

    let complete = table.complete_row_indices();
    if complete.len() < 10 {
        return Err(AquasolError::InvalidInput(format!(
            "only {} rows with descriptors; need at least 10 to model",
            complete.len()
        )));
    }

    let (x, y) = table.design_matrix();
    let n_features = x.len() / y.len();

    // --- regression stage -------------------------------------------------
    let (train_idx, test_idx) = train_test_split(y.len(), config.test_fraction, SEED)?;

    let gather = |indices: &[usize]| -> (Vec<f64>, Vec<f64>) {
        let mut data = Vec::with_capacity(indices.len() * n_features);
        let mut targets = Vec::with_capacity(indices.len());
        for &i in indices {
            data.extend_from_slice(&x[i * n_features..(i + 1) * n_features]);
            targets.push(y[i]);
        }
        (data, targets)
    };

    let (mut x_train, y_train) = gather(&train_idx);
    let (mut x_test, y_test) = gather(&test_idx);

    // statistics from the training split only; the same transform everywhere
    let scaler = StandardScaler::fit(&x_train, n_features)?;
    scaler.transform(&mut x_train)?;
    scaler.transform(&mut x_test)?;

    let regressor = ForestRegressor::fit(&x_train, n_features, &y_train, &config.forest)?;
    let test_pred = regressor.predict_batch(&x_test);
    let mse = mean_squared_error(&y_test, &test_pred)?;
    let r2 = r_squared(&y_test, &test_pred)?;

    // --- full-dataset inference ------------------------------------------
    let mut x_full = x.clone();
    scaler.transform(&mut x_full)?;
    let full_pred = regressor.predict_batch(&x_full);

    // --- threshold-derived classification ---------------------------------
    let derived = labels::derive_labels(&full_pred, config.threshold_molar);
    let train_labels: Vec<usize> = train_idx.iter().map(|&i| usize::from(derived[i])).collect();

    // independent re-split of the training subset, same seed
    let (cls_train, cls_test) = train_test_split(train_idx.len(), config.test_fraction, SEED)?;
    let gather_cls = |indices: &[usize]| -> (Vec<f64>, Vec<usize>) {
        let mut data = Vec::with_capacity(indices.len() * n_features);
        let mut lab = Vec::with_capacity(indices.len());
        for &i in indices {
            data.extend_from_slice(&x_train[i * n_features..(i + 1) * n_features]);
            lab.push(train_labels[i]);
        }
        (data, lab)
    };
    let (x_cls_train, y_cls_train) = gather_cls(&cls_train);
    let (x_cls_test, y_cls_test) = gather_cls(&cls_test);

    let classifier = ForestClassifier::fit(&x_cls_train, n_features, &y_cls_train, &config.forest)?;
    let cls_pred = classifier.predict_batch(&x_cls_test);
    let confusion = ConfusionMatrix::from_labels(&y_cls_test, &cls_pred, Some(2))?;
    let accuracy = confusion.accuracy();
    let report = classification_report(&confusion, &["insoluble", "soluble"]);

    // --- prediction artifact ----------------------------------------------
    let mut predictions = Vec::with_capacity(table.rows.len());
    let mut next_complete = 0usize;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let annotated = if row.descriptors.is_some() {
            debug_assert_eq!(complete[next_complete], row_idx);
            let pred = full_pred[next_complete];
            let soluble = derived[next_complete];
            next_complete += 1;
            PredictionRow {
                name: row.name.clone(),
                smiles: row.smiles.clone(),
                log_s: row.log_s,
                pred_log_s: Some(pred),
                pred_solubility: Some(labels::linear_solubility(pred)),
                soluble: Some(soluble),
            }
        } else {
            PredictionRow {
                name: row.name.clone(),
                smiles: row.smiles.clone(),
                log_s: row.log_s,
                pred_log_s: None,
                pred_solubility: None,
                soluble: None,
            }
        };
        predictions.push(annotated);
    }
    io::write_predictions(dir.join(PREDICTIONS_FILE), &predictions)?;

    // --- persisted artifacts ----------------------------------------------
    io::save_artifact(dir.join(REGRESSOR_FILE), &regressor)?;
    io::save_artifact(dir.join(SCALER_FILE), &scaler)?;
    io::save_artifact(dir.join(CLASSIFIER_FILE), &classifier)?;

    Ok(PipelineReport {
        n_input,
        n_rows: table.rows.len(),
        rejections,
        n_salts,
        regression: (mse, r2),
        regressor_importance: regressor.feature_importance(),
        classifier_accuracy: accuracy,
        confusion,
        classification_report: report,
        n_soluble: derived.iter().filter(|&&s| s).count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::NullResolver;
    use std::io::Write as _;

    /// Named, structurally valid compounds with plausible log-solubility.
    const DATASET: &[(&str, &str, f64)] = &[
        ("ethanol", "CCO", -0.77),
        ("methanol", "CO", 0.5),
        ("acetic acid", "CC(=O)O", 0.9),
        ("propanol", "CCCO", -0.3),
        ("butanol", "CCCCO", -0.9),
        ("pentanol", "CCCCCO", -1.5),
        ("hexanol", "CCCCCCO", -2.1),
        ("benzene", "c1ccccc1", -1.64),
        ("toluene", "Cc1ccccc1", -2.21),
        ("phenol", "Oc1ccccc1", -0.04),
        ("aniline", "Nc1ccccc1", -0.41),
        ("pyridine", "c1ccncc1", 0.8),
        ("naphthalene", "c1ccc2ccccc2c1", -3.6),
        ("anthracene", "c1ccc2cc3ccccc3cc2c1", -6.35),
        ("cyclohexane", "C1CCCCC1", -3.1),
        ("hexane", "CCCCCC", -3.84),
        ("octane", "CCCCCCCC", -5.24),
        ("acetone", "CC(C)=O", 1.0),
        ("urea", "NC(=O)N", 0.96),
        ("glycerol", "OCC(O)CO", 1.1),
        ("sodium acetate (Na)", "CC(=O)[O-].[Na+]", 0.6),
        ("aspirin", "CC(=O)Oc1ccccc1C(=O)O", -1.72),
        ("caffeine", "CN1C=NC2=C1C(=O)N(C)C(=O)N2C", -0.88),
        ("benzoic acid", "OC(=O)c1ccccc1", -1.59),
        ("chloroform", "ClC(Cl)Cl", -1.17),
    ];

    fn write_input(dir: &Path, rows: &[(&str, &str, f64)]) {
        let mut file = std::fs::File::create(dir.join(INPUT_FILE)).unwrap();
        writeln!(file, "Name,SMILES,LogS").unwrap();
        for (name, smiles, log_s) in rows {
            writeln!(file, "{name},{smiles},{log_s}").unwrap();
        }
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            forest: ForestConfig {
                n_trees: 15,
                max_depth: 6,
                ..ForestConfig::default()
            },
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn full_run_produces_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), DATASET);

        let report = run(dir.path(), &small_config(), &NullResolver).unwrap();
        assert_eq!(report.n_input, DATASET.len());
        assert_eq!(report.n_rows, DATASET.len());
        assert!(report.rejections.is_empty());
        assert!(report.regression.0 >= 0.0);
        assert!(report.classifier_accuracy >= 0.0 && report.classifier_accuracy <= 1.0);
        assert!(report.classification_report.contains("soluble"));

        for file in [
            FEATURES_FILE,
            PREDICTIONS_FILE,
            SALTS_FILE,
            REGRESSOR_FILE,
            SCALER_FILE,
            CLASSIFIER_FILE,
        ] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), DATASET);

        let config = small_config();
        let a = run(dir.path(), &config, &NullResolver).unwrap();
        let b = run(dir.path(), &config, &NullResolver).unwrap();
        assert_eq!(a.regression, b.regression);
        assert_eq!(a.classifier_accuracy, b.classifier_accuracy);
        assert_eq!(a.n_soluble, b.n_soluble);
    }

    #[test]
    fn missing_input_aborts_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        match run(dir.path(), &small_config(), &NullResolver) {
            Err(AquasolError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(!dir.path().join(FEATURES_FILE).exists());
    }

    #[test]
    fn too_few_rows_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), &DATASET[..4]);
        assert!(matches!(
            run(dir.path(), &small_config(), &NullResolver),
            Err(AquasolError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejected_rows_counted_and_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows: Vec<(&str, &str, f64)> = DATASET.to_vec();
        rows.push(("broken", "C1CC(", -1.0));
        write_input(dir.path(), &rows);

        let report = run(dir.path(), &small_config(), &NullResolver).unwrap();
        assert_eq!(report.n_input, rows.len());
        assert_eq!(report.n_rows, rows.len() - 1);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.rejections[0].index, rows.len() - 1);
        assert_eq!(report.rejections[0].smiles, "C1CC(");
    }
}
