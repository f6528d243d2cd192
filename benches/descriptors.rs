use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aquasol::descriptors::extract;
use aquasol::validate::validate;

/// Representative drug-like SMILES strings.
const SMILES_SET: &[&str] = &[
    "CCO",                            // ethanol
    "CC(=O)O",                        // acetic acid
    "c1ccccc1",                       // benzene
    "CC(=O)Oc1ccccc1C(=O)O",          // aspirin
    "CN1C=NC2=C1C(=O)N(C)C(=O)N2C",   // caffeine
    "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",  // ibuprofen
    "OC(=O)C1=CC=CC=C1O",             // salicylic acid
    "CC(=O)NC1=CC=C(C=C1)O",          // acetaminophen
    "c1ccc2ccccc2c1",                 // naphthalene
    "C1CCCCC1",                       // cyclohexane
    "NC(=O)N",                        // urea
    "CCCCCCCC",                       // octane
    "c1ccncc1",                       // pyridine
    "OCC(O)CO",                       // glycerol
    "CC(=O)[O-].[Na+]",               // sodium acetate
];

fn bench_validate(c: &mut Criterion) {
    let batch: Vec<&str> = SMILES_SET.iter().copied().cycle().take(500).collect();
    c.bench_function("validate_500", |b| {
        b.iter(|| {
            for &smi in black_box(&batch) {
                let _ = validate(smi);
            }
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let mols: Vec<_> = SMILES_SET.iter().map(|s| validate(s).unwrap()).collect();
    c.bench_function("extract_all_descriptors", |b| {
        b.iter(|| {
            for mol in black_box(&mols) {
                let _ = extract(mol);
            }
        })
    });
}

criterion_group!(benches, bench_validate, bench_extract);
criterion_main!(benches);
