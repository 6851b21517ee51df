//! Contract module containing trait definitions for the prediction pipeline

mod basis_builder;
mod hint_interpreter;
mod regressor;

pub use basis_builder::BasisBuilder;
pub use hint_interpreter::HintInterpreter;
pub use regressor::{FittedModel, Regressor};
