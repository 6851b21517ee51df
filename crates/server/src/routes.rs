//! API route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use predict_facade::{run_request, PredictRequest, PredictResponse, PredictionPipeline, ServiceError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub predict_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: PredictionPipeline, predict_timeout: Duration) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            predict_timeout,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fit on the observed data and predict at `x_predict`
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> (StatusCode, Json<PredictResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected malformed request");
            return (
                StatusCode::BAD_REQUEST,
                Json(PredictResponse::error(
                    predict_facade::response::KIND_INVALID_REQUEST,
                    rejection.body_text(),
                )),
            );
        }
    };

    let pipeline = Arc::clone(&state.pipeline);
    let task = tokio::task::spawn_blocking(move || run_request(&pipeline, request));

    match tokio::time::timeout(state.predict_timeout, task).await {
        Ok(Ok(Ok(result))) => (StatusCode::OK, Json(PredictResponse::success(result))),
        Ok(Ok(Err(err))) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(error = %err, "prediction failed");
            } else {
                warn!(error = %err, "prediction rejected");
            }
            (status, Json(PredictResponse::from(err)))
        }
        Ok(Err(join_error)) => {
            error!(error = %join_error, "prediction task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PredictResponse::internal()),
            )
        }
        Err(_) => {
            warn!(timeout_secs = state.predict_timeout.as_secs(), "prediction timed out");
            (StatusCode::REQUEST_TIMEOUT, Json(PredictResponse::timeout()))
        }
    }
}

/// Transport status for a failed request
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Request(_) => StatusCode::BAD_REQUEST,
        ServiceError::Predict(e) if e.is_caller_error() => StatusCode::BAD_REQUEST,
        ServiceError::Predict(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
