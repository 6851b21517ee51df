//! Prediction error types
//!
//! Defines the standardized error type for every stage of the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for prediction operations
pub type Result<T> = std::result::Result<T, PredictError>;

/// Errors that can occur while fitting or predicting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Not enough observed points to fit a model
    #[error("Insufficient data: need at least {required} observed points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Requested basis is empty or exceeds a configured ceiling
    #[error("Degenerate basis: {reason}")]
    DegenerateBasis { reason: String },

    /// Design matrix column count differs from the one the model was fitted on
    #[error("Schema mismatch: model expects {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// Inputs and targets disagree in length
    #[error("Length mismatch: {inputs} inputs but {targets} targets")]
    LengthMismatch { inputs: usize, targets: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    Numerical(String),
}

impl PredictError {
    /// Failure class reported to callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::InsufficientData { .. } => ErrorKind::InsufficientData,
            PredictError::DegenerateBasis { .. } => ErrorKind::DegenerateBasis,
            PredictError::SchemaMismatch { .. } | PredictError::LengthMismatch { .. } => {
                ErrorKind::SchemaMismatch
            }
            PredictError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            PredictError::Numerical(_) => ErrorKind::Numerical,
        }
    }

    /// True when the failure is caused by the caller's data rather than by
    /// the process wiring or configuration.
    pub fn is_caller_error(&self) -> bool {
        self.kind().is_caller_error()
    }
}

/// Wire-level classification of a [`PredictError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InsufficientData,
    DegenerateBasis,
    SchemaMismatch,
    InvalidParameter,
    Numerical,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InsufficientData => "insufficient_data",
            ErrorKind::DegenerateBasis => "degenerate_basis",
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::InvalidParameter => "invalid_parameter",
            ErrorKind::Numerical => "numerical",
        }
    }

    pub fn is_caller_error(&self) -> bool {
        matches!(self, ErrorKind::InsufficientData | ErrorKind::DegenerateBasis)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
