use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use llm_eval_core::{CoreError, Mode};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Carries the full core message, which already names the invalid
    /// mode and enumerates the valid ones.
    #[error("{0}")]
    UnknownMode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownMode { .. } => ApiError::UnknownMode(err.to_string()),
            CoreError::Validation { .. } => ApiError::Validation(err.to_string()),
            CoreError::MetricExecution(_) | CoreError::CatalogIntegrity(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Validation failed: {errors}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnknownMode(message) => {
                let available: Vec<&str> = Mode::ALL.iter().map(|m| m.as_str()).collect();
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": message, "available_modes": available })),
                )
                    .into_response()
            }
            ApiError::Validation(message) | ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
