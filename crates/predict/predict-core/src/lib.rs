//! Predict Core
//!
//! Core implementations of the prediction pipeline: keyword-table hint
//! interpretation, polynomial/sinusoidal basis expansion, closed-form ridge
//! regression, and the pipeline that wires them together per request.

pub mod basis;
pub mod hint;
pub mod pipeline;
pub mod ridge;

// Re-export SPI traits for implementations
pub use predict_spi::{
    BasisBuilder, DesignMatrix, ErrorKind, Feature, FittedModel, HintInterpreter, HintSpec,
    ObservedData, PredictError, PredictionResult, Regressor, Result, Sinusoids,
};

// Re-export main types
pub use basis::{BasisLimits, PolySinusoidBasis};
pub use hint::{HintEffect, KeywordInterpreter, KeywordRule, DEFAULT_RULES};
pub use pipeline::PredictionPipeline;
pub use ridge::{RidgeModel, RidgeRegression};
