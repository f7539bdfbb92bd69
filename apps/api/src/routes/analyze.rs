//! Axum route handler for the analysis endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::analysis::pipeline::{run_analysis, UploadedDocument};
use crate::errors::AppError;
use crate::models::report::AnalysisReport;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub response: AnalysisReport,
}

/// POST /analyze
///
/// Multipart request: a `file` part (binary + filename + content type) and a
/// `githubUserName` text part. Runs the full credibility pipeline and
/// returns the combined report, or a single stage-specific failure.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut document: Option<UploadedDocument> = None;
    let mut username: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let payload = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                document = Some(UploadedDocument {
                    filename,
                    content_type,
                    payload,
                });
            }
            "githubUserName" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                username = Some(value);
            }
            _ => {}
        }
    }

    let document = document
        .ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;
    let username = username
        .ok_or_else(|| AppError::Validation("Missing multipart field 'githubUserName'".to_string()))?;
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation(
            "githubUserName cannot be empty".to_string(),
        ));
    }

    let filename = document.filename.clone();
    let report = run_analysis(state.fetcher.as_ref(), &state.analyzer, document, username).await?;

    Ok(Json(AnalyzeResponse {
        message: format!("File '{filename}' uploaded, scraped & analysis successfully."),
        response: report,
    }))
}
