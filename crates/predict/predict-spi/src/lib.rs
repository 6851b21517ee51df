//! Predict Service Provider Interface
//!
//! Defines the contracts, data models and error types shared by every stage
//! of the hint-guided prediction pipeline:
//!
//! - [`HintInterpreter`]: free text to [`HintSpec`]
//! - [`BasisBuilder`]: [`HintSpec`] plus raw inputs to [`DesignMatrix`]
//! - [`Regressor`] / [`FittedModel`]: fit on one design matrix, evaluate on another
//! - [`PredictError`]: standardized failure type for all stages

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{BasisBuilder, FittedModel, HintInterpreter, Regressor};
pub use error::{ErrorKind, PredictError, Result};
pub use model::{DesignMatrix, Feature, HintSpec, ObservedData, PredictionResult, Sinusoids};
