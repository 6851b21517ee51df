//! Response bodies returned by the HTTP server and the CLI.

use crate::request::{RequestError, ServiceError};
use predict_spi::{PredictError, PredictionResult};
use serde::{Deserialize, Serialize};

pub const KIND_INVALID_REQUEST: &str = "invalid_request";
pub const KIND_TIMEOUT: &str = "timeout";
pub const KIND_INTERNAL: &str = "internal";

const INTERNAL_MESSAGE: &str = "Internal error while computing predictions";
const TIMEOUT_MESSAGE: &str = "Request timeout";

/// `{"status":"success",...}` or `{"status":"error",...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictResponse {
    Success { predictions: Vec<f64> },
    Error { kind: String, message: String },
}

impl PredictResponse {
    pub fn success(result: PredictionResult) -> Self {
        PredictResponse::Success {
            predictions: result.into_vec(),
        }
    }

    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        PredictResponse::Error {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(err: &RequestError) -> Self {
        Self::error(KIND_INVALID_REQUEST, err.to_string())
    }

    /// Caller errors keep their message; internal ones are replaced by a generic text
    pub fn from_predict_error(err: &PredictError) -> Self {
        if err.is_caller_error() {
            Self::error(err.kind().as_str(), err.to_string())
        } else {
            Self::error(err.kind().as_str(), INTERNAL_MESSAGE)
        }
    }

    pub fn timeout() -> Self {
        Self::error(KIND_TIMEOUT, TIMEOUT_MESSAGE)
    }

    pub fn internal() -> Self {
        Self::error(KIND_INTERNAL, INTERNAL_MESSAGE)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictResponse::Success { .. })
    }

    pub fn predictions(&self) -> Option<&[f64]> {
        match self {
            PredictResponse::Success { predictions } => Some(predictions),
            PredictResponse::Error { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self::success(result)
    }
}

impl From<&ServiceError> for PredictResponse {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Request(e) => Self::invalid_request(e),
            ServiceError::Predict(e) => Self::from_predict_error(e),
        }
    }
}

impl From<ServiceError> for PredictResponse {
    fn from(err: ServiceError) -> Self {
        Self::from(&err)
    }
}
