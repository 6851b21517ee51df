//! Prediction result model

use serde::{Deserialize, Serialize};

/// Point predictions, one per prediction input, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult {
    values: Vec<f64>,
}

impl PredictionResult {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for PredictionResult {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
