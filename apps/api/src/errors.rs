use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analyzer::AnalyzerError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                format!("Could not read the uploaded resume: {e}"),
            ),
            AppError::Analyzer(e) => {
                tracing::error!("Analyzer error: {e}");
                // The remote failure detail is part of the user-facing surface.
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYZER_ERROR",
                    format!("Error invoking the analyzer: {e}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
