#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::analyzer::AnalysisError;
use crate::document::ExtractionError;
use crate::github::GithubError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Status mapping: validation and extraction-content failures are
/// user-correctable (400); external-service, analysis, and infrastructure
/// failures are 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("GitHub error: {0}")]
    ExternalService(#[from] GithubError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => {
                let status = match e {
                    // Content-class failures: the upload itself is the problem.
                    ExtractionError::EmptyDocument | ExtractionError::NoExtractableText => {
                        StatusCode::BAD_REQUEST
                    }
                    ExtractionError::Unreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "EXTRACTION_ERROR", e.to_string())
            }
            AppError::ExternalService(e) => {
                tracing::error!("GitHub error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTERNAL_SERVICE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Analysis(e) => {
                tracing::error!("Analysis error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ANALYSIS_ERROR",
                    e.to_string(),
                )
            }
            AppError::Aggregation(msg) => {
                tracing::error!("Aggregation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AGGREGATION_ERROR",
                    msg.clone(),
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
