//! Model module containing data structures

mod design_matrix;
mod hint_spec;
mod observed_data;
mod prediction_result;

pub use design_matrix::{DesignMatrix, Feature};
pub use hint_spec::{HintSpec, Sinusoids};
pub use observed_data::ObservedData;
pub use prediction_result::PredictionResult;
