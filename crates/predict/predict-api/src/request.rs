//! Prediction request schema and validation.
//!
//! The same JSON body is accepted by the HTTP `/predict` route and by the CLI:
//!
//! ```json
//! {
//!   "x_observed": [1.0, 2.0, 3.0],
//!   "y_observed": [3.0, 5.0, 7.0],
//!   "x_predict": [4.0, 5.0],
//!   "t": "linear"
//! }
//! ```
//!
//! `x_observed` defaults to positions `1..=n`; `t` (alias `hint`) is optional;
//! `n` and `k`, when present, must equal the lengths of `y_observed` and
//! `x_predict`.

use predict_core::PredictionPipeline;
use predict_spi::{ObservedData, PredictError, PredictionResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Request-shape problems detected before the pipeline runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Body is not valid JSON or misses a required field
    #[error("Malformed request: {0}")]
    Malformed(String),

    /// Nothing to predict
    #[error("Invalid input: x_predict must contain at least one value")]
    EmptyPrediction,

    /// Declared count disagrees with the array length
    #[error("Invalid input: {field} has {actual} values but {expected} were declared")]
    DeclaredLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Explicit inputs and targets differ in length
    #[error("Invalid input: x_observed has {x} values but y_observed has {y}")]
    ObservedLength { x: usize, y: usize },

    /// Explicit inputs are not strictly increasing
    #[error("Invalid input: x_observed must be strictly increasing (violated at position {index})")]
    NotIncreasing { index: usize },

    /// NaN or infinite value
    #[error("Invalid input: {field} contains a non-finite value at position {index}")]
    NonFinite { field: &'static str, index: usize },
}

/// Prediction request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Observed inputs (defaults to 1..=n)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_observed: Option<Vec<f64>>,
    /// Observed targets
    pub y_observed: Vec<f64>,
    /// Inputs to predict at
    pub x_predict: Vec<f64>,
    /// Free-text hint
    #[serde(default, alias = "hint", skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    /// Declared number of observations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    /// Declared number of prediction inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

/// A request whose shape has been checked
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub observed: ObservedData,
    pub hint: Option<String>,
    pub x_predict: Vec<f64>,
}

impl PredictRequest {
    /// Parse a JSON body
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        serde_json::from_str(body).map_err(|e| RequestError::Malformed(e.to_string()))
    }

    /// Check shapes and values, producing the pipeline's inputs
    pub fn validate(self) -> Result<ValidatedRequest, RequestError> {
        if self.x_predict.is_empty() {
            return Err(RequestError::EmptyPrediction);
        }
        check_declared("y_observed", self.n, self.y_observed.len())?;
        check_declared("x_predict", self.k, self.x_predict.len())?;
        check_finite("y_observed", &self.y_observed)?;
        check_finite("x_predict", &self.x_predict)?;

        let observed = match self.x_observed {
            Some(x) => {
                if x.len() != self.y_observed.len() {
                    return Err(RequestError::ObservedLength {
                        x: x.len(),
                        y: self.y_observed.len(),
                    });
                }
                check_finite("x_observed", &x)?;
                if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
                    return Err(RequestError::NotIncreasing { index: index + 1 });
                }
                ObservedData::new(x, self.y_observed).map_err(|e| RequestError::Malformed(e.to_string()))?
            }
            None => ObservedData::positional(self.y_observed),
        };

        Ok(ValidatedRequest {
            observed,
            hint: self.t,
            x_predict: self.x_predict,
        })
    }
}

fn check_declared(field: &'static str, declared: Option<usize>, actual: usize) -> Result<(), RequestError> {
    match declared {
        Some(expected) if expected != actual => Err(RequestError::DeclaredLength {
            field,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), RequestError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(RequestError::NonFinite { field, index }),
        None => Ok(()),
    }
}

/// Failure of a full request: either its shape or the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Predict(#[from] PredictError),
}

/// Validate `request` and run it through `pipeline`
pub fn run_request(
    pipeline: &PredictionPipeline,
    request: PredictRequest,
) -> Result<PredictionResult, ServiceError> {
    let validated = request.validate().inspect_err(|e| {
        debug!(error = %e, "request failed validation");
    })?;
    let result = pipeline.predict(
        &validated.observed,
        validated.hint.as_deref(),
        &validated.x_predict,
    )?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictRequest {
        PredictRequest {
            x_observed: None,
            y_observed: vec![3.0, 5.0, 7.0],
            x_predict: vec![4.0],
            t: Some("linear".to_string()),
            n: None,
            k: None,
        }
    }

    // ==========================================================================
    // Parsing Tests
    // ==========================================================================

    #[test]
    fn test_parse_minimal_body() {
        let req = PredictRequest::from_json(r#"{"y_observed": [1, 2], "x_predict": [3]}"#).unwrap();
        assert_eq!(req.x_observed, None);
        assert_eq!(req.t, None);
        assert_eq!(req.y_observed, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_hint_alias() {
        let req = PredictRequest::from_json(
            r#"{"y_observed": [1], "x_predict": [2], "hint": "cubic"}"#,
        )
        .unwrap();
        assert_eq!(req.t.as_deref(), Some("cubic"));
    }

    #[test]
    fn test_parse_missing_field() {
        let err = PredictRequest::from_json(r#"{"y_observed": [1]}"#).unwrap_err();
        match err {
            RequestError::Malformed(msg) => assert!(msg.contains("x_predict"), "{}", msg),
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        let err =
            PredictRequest::from_json(r#"{"y_observed": ["a"], "x_predict": [1]}"#).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
    }

    // ==========================================================================
    // Validation Tests
    // ==========================================================================

    #[test]
    fn test_positional_inputs() {
        let validated = request().validate().unwrap();
        assert_eq!(validated.observed.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(validated.hint.as_deref(), Some("linear"));
    }

    #[test]
    fn test_explicit_inputs() {
        let req = PredictRequest {
            x_observed: Some(vec![0.0, 0.5, 2.0]),
            ..request()
        };
        assert_eq!(req.validate().unwrap().observed.x(), &[0.0, 0.5, 2.0]);
    }

    #[test]
    fn test_empty_prediction_rejected() {
        let req = PredictRequest {
            x_predict: vec![],
            ..request()
        };
        assert_eq!(req.validate().unwrap_err(), RequestError::EmptyPrediction);
    }

    #[test]
    fn test_observed_length_mismatch() {
        let req = PredictRequest {
            x_observed: Some(vec![1.0, 2.0]),
            ..request()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            RequestError::ObservedLength { x: 2, y: 3 }
        );
    }

    #[test]
    fn test_not_increasing() {
        let req = PredictRequest {
            x_observed: Some(vec![1.0, 3.0, 3.0]),
            ..request()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            RequestError::NotIncreasing { index: 2 }
        );
    }

    #[test]
    fn test_declared_counts() {
        let req = PredictRequest {
            n: Some(4),
            ..request()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            RequestError::DeclaredLength {
                field: "y_observed",
                expected: 4,
                actual: 3
            }
        );

        let req = PredictRequest {
            n: Some(3),
            k: Some(1),
            ..request()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let req = PredictRequest {
            y_observed: vec![1.0, f64::NAN, 2.0],
            ..request()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            RequestError::NonFinite {
                field: "y_observed",
                index: 1
            }
        );
    }

    #[test]
    fn test_empty_observations_pass_validation() {
        let req = PredictRequest {
            y_observed: vec![],
            ..request()
        };
        assert!(req.validate().unwrap().observed.is_empty());
    }

    // ==========================================================================
    // Run Tests
    // ==========================================================================

    #[test]
    fn test_run_request() {
        let result = run_request(&PredictionPipeline::default(), request()).unwrap();
        assert_eq!(result.len(), 1);
        assert!((result.values()[0] - 9.0).abs() < 1e-2);
    }

    #[test]
    fn test_run_request_insufficient_data() {
        let req = PredictRequest {
            y_observed: vec![],
            ..request()
        };
        let err = run_request(&PredictionPipeline::default(), req).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Predict(PredictError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_run_request_invalid_shape() {
        let req = PredictRequest {
            x_predict: vec![],
            ..request()
        };
        let err = run_request(&PredictionPipeline::default(), req).unwrap_err();
        assert_eq!(err, ServiceError::Request(RequestError::EmptyPrediction));
    }
}
