//! Polynomial plus sinusoidal basis expansion
//!
//! Column order is fixed: `[1, x, x^2, .., x^d, sin(w1 x), cos(w1 x), sin(w2 x), ..]`,
//! with the constant column present only when the spec keeps the bias term.
//! Inputs are used as given; no centering or scaling is applied, so large x
//! combined with a high degree can make the normal equations ill-conditioned.

use predict_spi::{BasisBuilder, Feature, HintSpec, PredictError, Result};

/// Upper bounds on basis size, checked before any matrix is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasisLimits {
    pub max_polynomial_degree: usize,
    pub max_frequencies: usize,
}

impl Default for BasisLimits {
    fn default() -> Self {
        Self {
            max_polynomial_degree: 6,
            max_frequencies: 6,
        }
    }
}

/// [`BasisBuilder`] producing bias, power and sin/cos columns
#[derive(Debug, Clone, PartialEq)]
pub struct PolySinusoidBasis {
    default_frequency: f64,
    limits: BasisLimits,
}

impl PolySinusoidBasis {
    /// Create a builder
    ///
    /// # Arguments
    ///
    /// * `default_frequency` - Angular frequency used when a periodic hint states none
    /// * `limits` - Ceilings on polynomial degree and frequency count
    pub fn new(default_frequency: f64, limits: BasisLimits) -> Result<Self> {
        if !default_frequency.is_finite() || default_frequency <= 0.0 {
            return Err(PredictError::InvalidParameter {
                name: "default_frequency".to_string(),
                reason: "must be finite and positive".to_string(),
            });
        }

        Ok(Self {
            default_frequency,
            limits,
        })
    }

    pub fn default_frequency(&self) -> f64 {
        self.default_frequency
    }

    pub fn limits(&self) -> BasisLimits {
        self.limits
    }

    fn check_limits(&self, spec: &HintSpec) -> Result<()> {
        if spec.polynomial_degree > self.limits.max_polynomial_degree {
            return Err(PredictError::DegenerateBasis {
                reason: format!(
                    "polynomial degree {} exceeds the ceiling of {}",
                    spec.polynomial_degree, self.limits.max_polynomial_degree
                ),
            });
        }
        let count = spec.sinusoids.count();
        if count > self.limits.max_frequencies {
            return Err(PredictError::DegenerateBasis {
                reason: format!(
                    "{} sinusoidal frequencies exceed the ceiling of {}",
                    count, self.limits.max_frequencies
                ),
            });
        }
        Ok(())
    }
}

impl Default for PolySinusoidBasis {
    fn default() -> Self {
        Self {
            default_frequency: 1.0,
            limits: BasisLimits::default(),
        }
    }
}

impl BasisBuilder for PolySinusoidBasis {
    fn features(&self, spec: &HintSpec) -> Result<Vec<Feature>> {
        self.check_limits(spec)?;

        let frequencies = spec.sinusoids.frequencies(self.default_frequency);
        if let Some(bad) = frequencies.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(PredictError::DegenerateBasis {
                reason: format!("angular frequency {} is not finite and positive", bad),
            });
        }

        let mut features =
            Vec::with_capacity(spec.bias_term as usize + spec.polynomial_degree + 2 * frequencies.len());
        if spec.bias_term {
            features.push(Feature::Bias);
        }
        features.extend((1..=spec.polynomial_degree).map(|p| Feature::Power(p as u32)));
        for omega in frequencies {
            features.push(Feature::Sin(omega));
            features.push(Feature::Cos(omega));
        }

        if features.is_empty() {
            return Err(PredictError::DegenerateBasis {
                reason: "spec selects no basis columns".to_string(),
            });
        }
        Ok(features)
    }
}
