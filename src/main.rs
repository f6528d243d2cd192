use std::path::Path;
use std::process::ExitCode;

use aquasol::pipeline::{self, PipelineConfig};
use aquasol::resolver::NullResolver;
use aquasol::DESCRIPTOR_NAMES;

fn main() -> ExitCode {
    let config = PipelineConfig::default();
    let report = match pipeline::run(Path::new("."), &config, &NullResolver) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("aquasol: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} compounds read, {} featurized, {} rejected",
        report.n_input,
        report.n_rows,
        report.rejections.len()
    );
    for rejection in &report.rejections {
        println!("  rejected row {}: {}", rejection.index, rejection.smiles);
    }
    println!("{} sodium/potassium salt rows", report.n_salts);

    let (mse, r2) = report.regression;
    println!("regression: mse = {mse:.4}, r2 = {r2:.4}");

    let mut ranked: Vec<(usize, f64)> = report
        .regressor_importance
        .iter()
        .copied()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    println!("top descriptors:");
    for &(idx, weight) in ranked.iter().take(5) {
        println!("  {:<20} {:.3}", DESCRIPTOR_NAMES[idx], weight);
    }

    println!(
        "derived labels: {} of {} soluble at threshold {} mol/L",
        report.n_soluble, report.n_rows, config.threshold_molar
    );
    println!("classifier accuracy: {:.4}", report.classifier_accuracy);
    println!(
        "confusion matrix: [[{}, {}], [{}, {}]]",
        report.confusion.get(0, 0),
        report.confusion.get(0, 1),
        report.confusion.get(1, 0),
        report.confusion.get(1, 1)
    );
    println!("{}", report.classification_report);

    ExitCode::SUCCESS
}
