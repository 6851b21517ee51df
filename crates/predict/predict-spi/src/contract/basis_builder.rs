//! Trait for expanding raw inputs into feature columns

use crate::error::Result;
use crate::model::{DesignMatrix, Feature, HintSpec};

/// Expands a scalar input sequence into a [`DesignMatrix`]
///
/// Implementors only decide the column layout; [`BasisBuilder::build`]
/// evaluates that layout row by row, so fit-time and predict-time matrices
/// built from the same spec always share column semantics.
pub trait BasisBuilder: Send + Sync {
    /// Ordered column layout for `spec`
    fn features(&self, spec: &HintSpec) -> Result<Vec<Feature>>;

    /// Build one row per input (an empty input gives a 0-row matrix)
    fn build(&self, spec: &HintSpec, inputs: &[f64]) -> Result<DesignMatrix> {
        let features = self.features(spec)?;
        let mut row = vec![0.0; features.len()];
        let mut matrix = DesignMatrix::with_capacity(features.clone(), inputs.len());
        for &x in inputs {
            for (slot, feature) in row.iter_mut().zip(&features) {
                *slot = feature.eval(x);
            }
            matrix.push_row(&row)?;
        }
        Ok(matrix)
    }
}
