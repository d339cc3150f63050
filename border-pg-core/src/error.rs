//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PgError {
    /// Inconsistent lengths of per-timestep arrays.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid combination of settings, detected when an agent is built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-finite values were produced or given.
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKey(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueType(String),
}
