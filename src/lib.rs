//! Aqueous solubility prediction from molecular structure.
//!
//! The pipeline ingests a table of compounds identified by SMILES strings,
//! validates each structure, computes a fixed set of 20 physicochemical
//! descriptors, trains an ensemble regressor for log-solubility, and derives
//! a binary soluble/insoluble classifier from the regressor's own
//! predictions at a fixed concentration threshold.
//!
//! # Example
//!
//! ```
//! use aquasol::{validate, extract, DESCRIPTOR_COUNT};
//!
//! let mol = validate("CC(=O)Oc1ccccc1C(=O)O").unwrap();
//! let descriptors = extract(&mol).unwrap();
//! assert_eq!(descriptors.len(), DESCRIPTOR_COUNT);
//! ```

pub mod descriptors;
pub mod element;
pub mod error;
pub mod forest;
pub mod io;
pub mod labels;
pub mod metrics;
pub mod molecule;
pub mod pipeline;
pub mod resolver;
pub mod ring;
pub mod scale;
pub mod smiles;
pub mod split;
pub mod table;
pub mod tree;
pub mod validate;

pub use descriptors::{extract, DESCRIPTOR_COUNT, DESCRIPTOR_NAMES};
pub use error::{AquasolError, Result};
pub use forest::{ForestClassifier, ForestConfig, ForestRegressor};
pub use labels::{derive_labels, SOLUBILITY_THRESHOLD_MOLAR};
pub use metrics::{classification_report, mean_squared_error, r_squared, ConfusionMatrix};
pub use molecule::{Atom, Bond, BondKind, Molecule};
pub use resolver::{NameResolver, NullResolver, NAME_UNAVAILABLE};
pub use scale::StandardScaler;
pub use split::train_test_split;
pub use table::{build_feature_table, CompoundRecord, FeatureRow, FeatureTable, RejectionLog};
pub use validate::validate;
