//! Predictor configuration.

use predict_core::{
    BasisLimits, KeywordInterpreter, PolySinusoidBasis, PredictionPipeline, RidgeRegression,
};
use predict_spi::PredictError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_RIDGE_LAMBDA: &str = "RIDGE_LAMBDA";
pub const ENV_DEFAULT_FREQUENCY: &str = "DEFAULT_ANGULAR_FREQUENCY";
pub const ENV_MAX_DEGREE: &str = "MAX_POLYNOMIAL_DEGREE";
pub const ENV_MAX_FREQUENCIES: &str = "MAX_FREQUENCIES";

const DEGREE_HARD_CAP: usize = 32;
const FREQUENCY_HARD_CAP: usize = 64;

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A variable is present but cannot be used
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Values parse but the pipeline rejects them
    #[error("Invalid predictor configuration: {0}")]
    Predictor(#[from] PredictError),
}

// ============================================================================
// Predictor Configuration
// ============================================================================

/// Process-wide predictor settings, read-only after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Ridge penalty (lambda > 0).
    pub ridge_lambda: f64,
    /// Angular frequency for periodic hints that state no period.
    pub default_frequency: f64,
    /// Highest polynomial degree a hint may request.
    pub max_polynomial_degree: usize,
    /// Most sinusoidal frequencies a hint may request.
    pub max_frequencies: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        let limits = BasisLimits::default();
        Self {
            ridge_lambda: predict_core::ridge::DEFAULT_LAMBDA,
            default_frequency: 1.0,
            max_polynomial_degree: limits.max_polynomial_degree,
            max_frequencies: limits.max_frequencies,
        }
    }
}

impl PredictorConfig {
    /// Load from process environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (absent keys keep their defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            ridge_lambda: parse_or(&lookup, ENV_RIDGE_LAMBDA, defaults.ridge_lambda)?,
            default_frequency: parse_or(&lookup, ENV_DEFAULT_FREQUENCY, defaults.default_frequency)?,
            max_polynomial_degree: parse_or(&lookup, ENV_MAX_DEGREE, defaults.max_polynomial_degree)?,
            max_frequencies: parse_or(&lookup, ENV_MAX_FREQUENCIES, defaults.max_frequencies)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ridge_lambda.is_finite() || self.ridge_lambda <= 0.0 {
            return Err(invalid(ENV_RIDGE_LAMBDA, self.ridge_lambda, "must be finite and positive"));
        }
        if !self.default_frequency.is_finite() || self.default_frequency <= 0.0 {
            return Err(invalid(
                ENV_DEFAULT_FREQUENCY,
                self.default_frequency,
                "must be finite and positive",
            ));
        }
        if !(1..=DEGREE_HARD_CAP).contains(&self.max_polynomial_degree) {
            return Err(invalid(
                ENV_MAX_DEGREE,
                self.max_polynomial_degree,
                &format!("must be between 1 and {}", DEGREE_HARD_CAP),
            ));
        }
        if !(1..=FREQUENCY_HARD_CAP).contains(&self.max_frequencies) {
            return Err(invalid(
                ENV_MAX_FREQUENCIES,
                self.max_frequencies,
                &format!("must be between 1 and {}", FREQUENCY_HARD_CAP),
            ));
        }
        Ok(())
    }

    pub fn basis_limits(&self) -> BasisLimits {
        BasisLimits {
            max_polynomial_degree: self.max_polynomial_degree,
            max_frequencies: self.max_frequencies,
        }
    }

    /// Build the pipeline described by this configuration
    pub fn build_pipeline(&self) -> Result<PredictionPipeline, ConfigError> {
        self.validate()?;
        let basis = PolySinusoidBasis::new(self.default_frequency, self.basis_limits())?;
        let regression = RidgeRegression::new(self.ridge_lambda)?;
        Ok(PredictionPipeline::new(
            Box::new(KeywordInterpreter::default()),
            Box::new(basis),
            regression,
        ))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn invalid(key: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
