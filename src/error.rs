//! Structured error types for the aquasol pipeline.

use thiserror::Error;

/// Unified error type for all aquasol operations.
///
/// Row-level failures (`InvalidStructure`, `Descriptor`) are recoverable and
/// never abort a batch; file-level failures (`Io`, `MissingColumn`) abort the
/// run before any model training begins.
#[derive(Debug, Error)]
pub enum AquasolError {
    /// I/O error (missing input file, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the input table.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// Malformed structural notation (SMILES syntax error).
    #[error("parse error: {0}")]
    Parse(String),

    /// The notation parsed but failed chemical sanitization.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// Descriptor computation failed for a validated structure.
    #[error("descriptor computation failed: {0}")]
    Descriptor(String),

    /// Invalid input (bad arguments, inconsistent dimensions).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AquasolError>;
