//! Design matrix model

use crate::error::{PredictError, Result};
use serde::{Deserialize, Serialize};

/// Semantic label of one design-matrix column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "term", content = "param", rename_all = "snake_case")]
pub enum Feature {
    /// Constant 1
    Bias,
    /// x raised to the given power
    Power(u32),
    /// sin(omega * x)
    Sin(f64),
    /// cos(omega * x)
    Cos(f64),
}

impl Feature {
    /// Value of this feature at `x`
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Feature::Bias => 1.0,
            Feature::Power(1) => x,
            Feature::Power(p) => x.powi(p as i32),
            Feature::Sin(omega) => (omega * x).sin(),
            Feature::Cos(omega) => (omega * x).cos(),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Bias => write!(f, "1"),
            Feature::Power(1) => write!(f, "x"),
            Feature::Power(p) => write!(f, "x^{}", p),
            Feature::Sin(omega) => write!(f, "sin({}x)", omega),
            Feature::Cos(omega) => write!(f, "cos({}x)", omega),
        }
    }
}

/// Dense row-major feature matrix
///
/// Rows are input points, columns are the labelled [`Feature`]s. A matrix may
/// have zero rows; its column layout is still meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    features: Vec<Feature>,
    rows: usize,
    data: Vec<f64>,
}

impl DesignMatrix {
    /// Empty matrix (0 rows) with the given column layout
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            rows: 0,
            data: Vec::new(),
        }
    }

    /// Empty matrix with room for `rows` rows
    pub fn with_capacity(features: Vec<Feature>, rows: usize) -> Self {
        let cols = features.len();
        Self {
            features,
            rows: 0,
            data: Vec::with_capacity(rows * cols),
        }
    }

    /// Append a row; its length must equal the column count
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.cols() {
            return Err(PredictError::SchemaMismatch {
                expected: self.cols(),
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column labels, in column order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.cols();
        &self.data[row * cols..(row + 1) * cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0; a zero-column matrix has no data anyway
        self.data.chunks_exact(self.cols().max(1))
    }
}
