//! Error types for prediction operations
//!
//! This module provides the [`PredictError`] enum, the wire-facing
//! [`ErrorKind`] classification and the [`Result`] type alias.

mod predict_error;

pub use predict_error::{ErrorKind, PredictError, Result};
