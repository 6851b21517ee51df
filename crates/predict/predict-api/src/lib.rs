//! Predict Consumer API
//!
//! Consumer-facing configuration and request handling for the prediction
//! pipeline.
//!
//! This crate provides:
//! - [`PredictorConfig`]: process-wide settings loaded from the environment
//! - [`PredictRequest`]: the request schema shared by the HTTP server and CLI,
//!   with shape validation
//! - [`PredictResponse`]: the success/error body returned to callers
//! - Re-exports from SPI and core for convenience

pub mod config;
pub mod request;
pub mod response;

pub use config::{ConfigError, PredictorConfig};
pub use request::{run_request, PredictRequest, RequestError, ServiceError, ValidatedRequest};
pub use response::PredictResponse;

// Re-export from core
pub use predict_core::{
    basis, hint, pipeline, ridge, BasisLimits, HintEffect, KeywordInterpreter, KeywordRule,
    PolySinusoidBasis, PredictionPipeline, RidgeModel, RidgeRegression, DEFAULT_RULES,
};

// Re-export traits and models from SPI
pub use predict_spi::{
    BasisBuilder, DesignMatrix, ErrorKind, Feature, FittedModel, HintInterpreter, HintSpec,
    ObservedData, PredictError, PredictionResult, Regressor, Result, Sinusoids,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        run_request, ConfigError, PredictRequest, PredictResponse, PredictorConfig,
        RequestError, ServiceError,
    };
    pub use predict_core::{KeywordInterpreter, PolySinusoidBasis, PredictionPipeline, RidgeRegression};
    pub use predict_spi::{
        BasisBuilder, FittedModel, HintInterpreter, HintSpec, ObservedData, PredictError,
        PredictionResult, Regressor, Sinusoids,
    };
}
