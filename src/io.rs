//! Delimited-file input and artifact output.
//!
//! All tabular artifacts are plain CSV. Headers are whitespace-trimmed
//! before case-sensitive matching.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;

use crate::descriptors::DESCRIPTOR_NAMES;
use crate::error::{AquasolError, Result};
use crate::table::{CompoundRecord, FeatureRow, FeatureTable};

/// Source column holding the structural notation.
pub const SMILES_COLUMN: &str = "SMILES";
/// Source column holding the measured log-solubility target.
pub const TARGET_COLUMN: &str = "LogS";
/// Optional source column holding a display name.
pub const NAME_COLUMN: &str = "Name";

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        AquasolError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        AquasolError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Read the source dataset.
///
/// # Errors
///
/// `Io` when the file is missing, `MissingColumn` when `SMILES` or `LogS`
/// is absent from the header, `Parse` on a malformed target value.
pub fn read_compounds(path: impl AsRef<Path>) -> Result<Vec<CompoundRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AquasolError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let smiles_col =
        column(SMILES_COLUMN).ok_or_else(|| AquasolError::MissingColumn(SMILES_COLUMN.into()))?;
    let target_col =
        column(TARGET_COLUMN).ok_or_else(|| AquasolError::MissingColumn(TARGET_COLUMN.into()))?;
    let name_col = column(NAME_COLUMN);

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| AquasolError::Parse(e.to_string()))?;
        let smiles = row.get(smiles_col).unwrap_or("").trim().to_string();
        let target = row.get(target_col).unwrap_or("").trim();
        let log_s: f64 = target.parse().map_err(|_| {
            AquasolError::Parse(format!(
                "row {}: target '{}' is not a number",
                line + 1,
                target
            ))
        })?;
        let name = name_col
            .and_then(|c| row.get(c))
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        records.push(CompoundRecord { name, smiles, log_s });
    }
    Ok(records)
}

/// Write the enriched feature table: identifiers, target, then the 20
/// descriptor columns in fixed order. Unavailable descriptor vectors
/// produce empty cells, never partial rows.
pub fn write_feature_table(path: impl AsRef<Path>, table: &FeatureTable) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new().from_writer(create(path)?);

    let mut header = vec![NAME_COLUMN, SMILES_COLUMN, TARGET_COLUMN];
    header.extend_from_slice(&DESCRIPTOR_NAMES);
    writer
        .write_record(&header)
        .map_err(|e| AquasolError::Parse(e.to_string()))?;

    for row in &table.rows {
        let mut fields = vec![row.name.clone(), row.smiles.clone(), format_f64(row.log_s)];
        match &row.descriptors {
            Some(values) => fields.extend(values.iter().map(|&v| format_f64(v))),
            None => fields.extend(std::iter::repeat(String::new()).take(DESCRIPTOR_NAMES.len())),
        }
        writer
            .write_record(&fields)
            .map_err(|e| AquasolError::Parse(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// One row of the fully-annotated prediction artifact.
#[derive(Debug, Clone)]
pub struct PredictionRow {
    pub name: String,
    pub smiles: String,
    pub log_s: f64,
    /// Predicted log-solubility; `None` when descriptors were unavailable.
    pub pred_log_s: Option<f64>,
    /// Predicted linear solubility in mol/L.
    pub pred_solubility: Option<f64>,
    /// Threshold-derived label.
    pub soluble: Option<bool>,
}

/// Write the prediction artifact: original columns plus predicted
/// log-solubility, predicted linear solubility, a text label, and the
/// binary label.
pub fn write_predictions(path: impl AsRef<Path>, rows: &[PredictionRow]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new().from_writer(create(path)?);

    writer
        .write_record([
            NAME_COLUMN,
            SMILES_COLUMN,
            TARGET_COLUMN,
            "PredLogS",
            "PredSolubility",
            "Label",
            "Soluble",
        ])
        .map_err(|e| AquasolError::Parse(e.to_string()))?;

    for row in rows {
        let label = row.soluble.map(|s| if s { "soluble" } else { "insoluble" });
        let fields = [
            row.name.clone(),
            row.smiles.clone(),
            format_f64(row.log_s),
            row.pred_log_s.map(format_f64).unwrap_or_default(),
            row.pred_solubility.map(format_f64).unwrap_or_default(),
            label.unwrap_or_default().to_string(),
            row.soluble
                .map(|s| if s { "1" } else { "0" })
                .unwrap_or_default()
                .to_string(),
        ];
        writer
            .write_record(&fields)
            .map_err(|e| AquasolError::Parse(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the salt subset artifact (same schema as the feature table).
pub fn write_salt_subset(path: impl AsRef<Path>, rows: &[&FeatureRow]) -> Result<()> {
    let table = FeatureTable {
        rows: rows.iter().map(|&r| r.clone()).collect(),
    };
    write_feature_table(path, &table)
}

/// Persist a trained artifact as JSON.
pub fn save_artifact<T: Serialize>(path: impl AsRef<Path>, artifact: &T) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(create(path)?);
    let json = serde_json::to_string_pretty(artifact)
        .map_err(|e| AquasolError::InvalidInput(e.to_string()))?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn format_f64(v: f64) -> String {
    if v.is_finite() {
        format!("{v}")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_basic_table() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Name,SMILES,LogS").unwrap();
        writeln!(file, "ethanol,CCO,-0.77").unwrap();
        writeln!(file, ",CCC,-1.94").unwrap();
        file.flush().unwrap();

        let records = read_compounds(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("ethanol"));
        assert!(records[1].name.is_none());
        assert!((records[0].log_s + 0.77).abs() < 1e-12);
    }

    #[test]
    fn headers_are_trimmed() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, " Name , SMILES , LogS ").unwrap();
        writeln!(file, "water,O,1.5").unwrap();
        file.flush().unwrap();

        let records = read_compounds(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].smiles, "O");
    }

    #[test]
    fn missing_file_is_fatal() {
        match read_compounds("/nonexistent/input.csv") {
            Err(AquasolError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn missing_target_column_is_fatal() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Name,SMILES").unwrap();
        writeln!(file, "ethanol,CCO").unwrap();
        file.flush().unwrap();

        match read_compounds(file.path()) {
            Err(AquasolError::MissingColumn(col)) => assert_eq!(col, "LogS"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn column_match_is_case_sensitive() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Name,smiles,LogS").unwrap();
        writeln!(file, "ethanol,CCO,-0.77").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_compounds(file.path()),
            Err(AquasolError::MissingColumn(_))
        ));
    }

    #[test]
    fn feature_table_round_trip_schema() {
        use crate::resolver::NullResolver;
        use crate::table::{build_feature_table, CompoundRecord};

        let records = vec![CompoundRecord {
            name: Some("ethanol".into()),
            smiles: "CCO".into(),
            log_s: -0.77,
        }];
        let (table, _) = build_feature_table(&records, &NullResolver);

        let out = NamedTempFile::with_suffix(".csv").unwrap();
        write_feature_table(out.path(), &table).unwrap();

        let text = std::fs::read_to_string(out.path()).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("Name,SMILES,LogS,MolWt,LogP,TPSA"));
        assert_eq!(header.split(',').count(), 3 + DESCRIPTOR_NAMES.len());
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn prediction_rows_serialize_labels() {
        let rows = vec![
            PredictionRow {
                name: "ethanol".into(),
                smiles: "CCO".into(),
                log_s: -0.77,
                pred_log_s: Some(-0.8),
                pred_solubility: Some(0.158),
                soluble: Some(true),
            },
            PredictionRow {
                name: "odd".into(),
                smiles: "C".into(),
                log_s: 0.0,
                pred_log_s: None,
                pred_solubility: None,
                soluble: None,
            },
        ];
        let out = NamedTempFile::with_suffix(".csv").unwrap();
        write_predictions(out.path(), &rows).unwrap();
        let text = std::fs::read_to_string(out.path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,SMILES,LogS,PredLogS,PredSolubility,Label,Soluble"
        );
        assert!(lines.next().unwrap().ends_with("soluble,1"));
        assert!(lines.next().unwrap().ends_with(",,,"));
    }
}
