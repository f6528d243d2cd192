//! Compound records and the feature table builder.

use crate::descriptors::{self, DESCRIPTOR_COUNT};
use crate::resolver::{NameResolver, NAME_UNAVAILABLE};
use crate::validate;

/// One row of the source dataset.
#[derive(Debug, Clone)]
pub struct CompoundRecord {
    /// Optional display name from the source table.
    pub name: Option<String>,
    /// Structural notation; immutable once read.
    pub smiles: String,
    /// Measured log-solubility (mol/L, base-10 log).
    pub log_s: f64,
}

/// A record that passed validation, enriched with descriptors.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub name: String,
    pub smiles: String,
    pub log_s: f64,
    /// `None` when descriptor computation failed as a whole; never partial.
    pub descriptors: Option<Vec<f64>>,
}

/// A record rejected by structural validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Zero-based index in the input sequence.
    pub index: usize,
    /// The original notation, verbatim.
    pub smiles: String,
}

/// Accumulated rejections for one build pass.
pub type RejectionLog = Vec<Rejection>;

/// Rectangular feature table: every row passed validation.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Indices of rows whose descriptor vector is available.
    pub fn complete_row_indices(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&i| self.rows[i].descriptors.is_some())
            .collect()
    }

    /// Flat row-major matrix of the complete rows plus their targets.
    ///
    /// Row order follows [`complete_row_indices`](Self::complete_row_indices).
    pub fn design_matrix(&self) -> (Vec<f64>, Vec<f64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for row in &self.rows {
            if let Some(d) = &row.descriptors {
                x.extend_from_slice(d);
                y.push(row.log_s);
            }
        }
        (x, y)
    }

    /// Rows whose display name matches the sodium/potassium salt heuristic:
    /// a case-insensitive substring match on "na" or "k".
    pub fn salt_rows(&self) -> Vec<&FeatureRow> {
        self.rows
            .iter()
            .filter(|r| {
                let lower = r.name.to_lowercase();
                lower.contains("na") || lower.contains('k')
            })
            .collect()
    }
}

/// Validate and enrich every record, returning the table together with the
/// rejection log as an explicit pair.
///
/// Records failing validation are dropped entirely; records whose descriptor
/// batch fails are kept with an unavailable marker. Name resolution goes
/// through `resolver` and falls back to the [`NAME_UNAVAILABLE`] sentinel;
/// it never fails the pipeline.
pub fn build_feature_table(
    records: &[CompoundRecord],
    resolver: &dyn NameResolver,
) -> (FeatureTable, RejectionLog) {
    let mut table = FeatureTable::default();
    let mut rejections = RejectionLog::new();

    for (index, record) in records.iter().enumerate() {
        let mol = match validate::validate(&record.smiles) {
            Ok(mol) => mol,
            Err(_) => {
                rejections.push(Rejection {
                    index,
                    smiles: record.smiles.clone(),
                });
                continue;
            }
        };

        let descriptors = match descriptors::extract(&mol) {
            Ok(values) => {
                debug_assert_eq!(values.len(), DESCRIPTOR_COUNT);
                Some(values)
            }
            Err(_) => None,
        };

        let name = match &record.name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => resolver
                .resolve(&record.smiles)
                .unwrap_or_else(|| NAME_UNAVAILABLE.to_string()),
        };

        table.rows.push(FeatureRow {
            name,
            smiles: record.smiles.clone(),
            log_s: record.log_s,
            descriptors,
        });
    }

    (table, rejections)
}
