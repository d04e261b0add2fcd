//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use fishpond_core::{assess, FishpondError, PredictionResult, SensorReading};

use crate::AppState;

/// Body of `GET /`
pub const HEALTH_MESSAGE: &str = "Fish Pond Simulator Backend is Running!";

/// Errors returned to API clients as `{"error": "..."}`
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not be turned into a prediction
    #[error("{0}")]
    BadRequest(String),

    /// Server-side fault, not caused by the request
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FishpondError> for ApiError {
    fn from(err: FishpondError) -> Self {
        match err {
            FishpondError::Model(_) => ApiError::BadRequest(err.to_string()),
            FishpondError::UnknownClass(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) => tracing::warn!("Rejected prediction request: {}", msg),
            ApiError::Internal(msg) => tracing::error!("Prediction failed: {}", msg),
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Liveness check
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// Classify a sensor reading and attach advisories
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(body) = payload?;
    let reading = SensorReading::from_json_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid sensor reading: {}", e)))?;
    let result = assess(state.classifier.as_ref(), &reading)?;

    tracing::debug!(
        water_quality = %result.water_quality,
        recommendations = result.recommendations.len(),
        "Prediction served"
    );
    Ok(Json(result))
}
