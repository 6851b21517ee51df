//! Observed (x, y) pairs

use crate::error::{PredictError, Result};

/// Ordered observations the model is fitted on
///
/// Inputs are either supplied explicitly or default to positions `1..=n`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedData {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ObservedData {
    /// Pair explicit inputs with targets
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PredictError::LengthMismatch {
                inputs: x.len(),
                targets: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Targets at implicit positions 1, 2, ..., n
    pub fn positional(y: Vec<f64>) -> Self {
        let x = (1..=y.len()).map(|i| i as f64).collect();
        Self { x, y }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}
