//! Traits for fitting and evaluating linear models over design matrices

use crate::error::{PredictError, Result};
use crate::model::{DesignMatrix, PredictionResult};

/// Fits a linear model on a design matrix and a target vector
pub trait Regressor: Send + Sync {
    /// Fitted model type
    type Model: FittedModel;

    /// Fit coefficients, one per column of `x`
    fn fit(&self, x: &DesignMatrix, y: &[f64]) -> Result<Self::Model>;
}

/// A fitted linear model: predictions are `x · coefficients`
pub trait FittedModel {
    /// One coefficient per design-matrix column
    fn coefficients(&self) -> &[f64];

    /// Evaluate the model on a new design matrix with the fitted column count
    fn predict(&self, x: &DesignMatrix) -> Result<PredictionResult> {
        let beta = self.coefficients();
        if x.cols() != beta.len() {
            return Err(PredictError::SchemaMismatch {
                expected: beta.len(),
                actual: x.cols(),
            });
        }
        let values = x
            .iter_rows()
            .map(|row| row.iter().zip(beta).map(|(a, b)| a * b).sum::<f64>())
            .collect();
        Ok(PredictionResult::new(values))
    }
}
