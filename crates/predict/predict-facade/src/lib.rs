//! Predict Facade
//!
//! High-level API for hint-guided prediction. Re-exports all public types
//! from the predict stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use predict_api::*;

// Explicit re-exports for documentation
pub use predict_api::prelude;

// Re-export core modules for direct access
pub use predict_core::{basis, hint, pipeline, ridge};

// Re-export SPI traits
pub use predict_spi::{BasisBuilder, FittedModel, HintInterpreter, PredictError, Regressor};
