// src/error.rs

use thiserror::Error;

/// Result type alias using DispatchError
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Everything that can go wrong outside of a running simulation.
///
/// A simulation itself never fails: an infeasible scenario just scores less.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("succession produced {actual} candidates, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },
}
