// Document intake: upload validation and text extraction.
// Extraction is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod docx;
pub mod pdf;
pub mod validation;

use thiserror::Error;

/// Declared document format, resolved from filename extension + content-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document has no pages")]
    EmptyDocument,

    #[error("no extractable text found — the file may be image-based or scanned")]
    NoExtractableText,

    #[error("unreadable document: {0}")]
    Unreadable(String),
}

/// Distinguishes "structurally empty" from "scanned, nothing to extract".
const MIN_EXTRACTED_CHARS: usize = 10;

/// Extracts plain text from the uploaded binary, dispatching on the declared
/// format. Returns the text untrimmed; callers run content checks on it.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
    };

    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        return Err(ExtractionError::NoExtractableText);
    }

    Ok(text)
}
