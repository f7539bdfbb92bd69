//! Upload and content validation for resume documents.
//!
//! Ordering matters: type/size checks run before extraction; the content
//! check runs after extraction but before any external call, so a non-resume
//! upload never costs a GitHub round trip.

use crate::document::DocumentKind;
use crate::errors::AppError;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const MIN_WORD_COUNT: usize = 50;

/// Case-insensitive substring markers; any one match confirms the text is
/// plausibly a resume.
const RESUME_LEXICON: &[&str] = &[
    "experience",
    "education",
    "skills",
    "certification",
    "project",
    "employment",
    "university",
    "degree",
    "internship",
    "objective",
    "summary",
    "work history",
    "achievements",
    "references",
];

fn kind_from_extension(filename: &str) -> Option<DocumentKind> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        Some(DocumentKind::Pdf)
    } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
        Some(DocumentKind::Docx)
    } else {
        None
    }
}

fn kind_from_content_type(content_type: &str) -> Option<DocumentKind> {
    match content_type {
        "application/pdf" => Some(DocumentKind::Pdf),
        "application/msword"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            Some(DocumentKind::Docx)
        }
        _ => None,
    }
}

/// Pre-extraction checks: allow-listed type, declared metadata consistency,
/// non-empty payload under the size ceiling. Returns the resolved format
/// used for extraction dispatch.
pub fn validate_upload(
    filename: &str,
    content_type: &str,
    payload: &[u8],
) -> Result<DocumentKind, AppError> {
    let by_extension = kind_from_extension(filename).ok_or_else(|| {
        AppError::Validation("Only PDF, DOC, or DOCX files are allowed.".to_string())
    })?;

    let by_content_type = kind_from_content_type(content_type).ok_or_else(|| {
        AppError::Validation(
            "Invalid file type. Only PDF, DOC, or DOCX files are allowed.".to_string(),
        )
    })?;

    // Spoofed metadata defense: both declarations must agree.
    if by_extension != by_content_type {
        return Err(AppError::Validation(format!(
            "File extension of '{filename}' does not match declared content type '{content_type}'"
        )));
    }

    if payload.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    if payload.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File is too large: {} bytes (limit is {} bytes)",
            payload.len(),
            MAX_UPLOAD_BYTES
        )));
    }

    Ok(by_extension)
}

/// Post-extraction check: enough words, and at least one resume-indicative
/// term. Runs before the profile fetch and any analyzer call.
pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORD_COUNT {
        return Err(AppError::Validation(format!(
            "Extracted text has only {word_count} words (minimum {MIN_WORD_COUNT}); the document does not look like a resume"
        )));
    }

    let lower = text.to_lowercase();
    if !RESUME_LEXICON.iter().any(|term| lower.contains(term)) {
        return Err(AppError::Validation(
            "Extracted text contains no resume-indicative terms (e.g. experience, education, skills)"
                .to_string(),
        ));
    }

    Ok(())
}
