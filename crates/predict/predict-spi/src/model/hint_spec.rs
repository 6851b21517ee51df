//! Structured basis recipe produced from a free-text hint

use serde::{Deserialize, Serialize};

/// Which basis terms to include when expanding raw inputs
///
/// Produced once per request by a [`HintInterpreter`](crate::HintInterpreter)
/// and shared by the fit-time and predict-time basis expansions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintSpec {
    /// Highest power of x (0 means no polynomial columns)
    pub polynomial_degree: usize,
    /// Sinusoidal terms
    pub sinusoids: Sinusoids,
    /// Whether a constant column leads the design matrix
    pub bias_term: bool,
}

impl HintSpec {
    /// Polynomial-only spec with a bias term
    pub fn polynomial(degree: usize) -> Self {
        Self {
            polynomial_degree: degree,
            sinusoids: Sinusoids::Off,
            bias_term: true,
        }
    }

    pub fn with_sinusoids(mut self, sinusoids: Sinusoids) -> Self {
        self.sinusoids = sinusoids;
        self
    }

    pub fn without_bias(mut self) -> Self {
        self.bias_term = false;
        self
    }

    /// Whether sin/cos columns are generated
    pub fn include_sin_cos(&self) -> bool {
        self.sinusoids.is_enabled()
    }
}

impl Default for HintSpec {
    /// Linear trend with intercept, no sinusoidal terms
    fn default() -> Self {
        Self::polynomial(1)
    }
}

/// Sinusoidal part of a [`HintSpec`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sinusoids {
    /// No sin/cos columns
    #[default]
    Off,
    /// Multiples 1..=harmonics of the configured default angular frequency
    DefaultFrequency { harmonics: usize },
    /// Angular frequencies stated by the hint
    Explicit { frequencies: Vec<f64> },
}

impl Sinusoids {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Sinusoids::Off)
    }

    /// Number of distinct frequencies (each yields a sin and a cos column)
    pub fn count(&self) -> usize {
        match self {
            Sinusoids::Off => 0,
            Sinusoids::DefaultFrequency { harmonics } => *harmonics,
            Sinusoids::Explicit { frequencies } => frequencies.len(),
        }
    }

    /// Resolve to concrete angular frequencies
    pub fn frequencies(&self, default_frequency: f64) -> Vec<f64> {
        match self {
            Sinusoids::Off => Vec::new(),
            Sinusoids::DefaultFrequency { harmonics } => (1..=*harmonics)
                .map(|h| h as f64 * default_frequency)
                .collect(),
            Sinusoids::Explicit { frequencies } => frequencies.clone(),
        }
    }
}
