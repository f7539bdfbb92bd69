//! PDF text extraction via `pdf-extract`.

use tracing::debug;

use super::ExtractionError;

/// Decodes a paginated PDF and joins the per-page text.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    debug!(page_count = pages.len(), "PDF decoded");
    join_pages(&pages)
}

/// Skips pages that yielded no text; survivors are joined with a blank line.
fn join_pages(pages: &[String]) -> Result<String, ExtractionError> {
    if pages.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let joined = pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pages_is_empty_document() {
        let result = join_pages(&[]);
        assert!(matches!(result, Err(ExtractionError::EmptyDocument)));
    }

    #[test]
    fn test_blank_pages_are_skipped() {
        let pages = vec![
            "Page one text".to_string(),
            "   \n ".to_string(),
            "Page three text".to_string(),
        ];
        let text = join_pages(&pages).unwrap();
        assert_eq!(text, "Page one text\n\nPage three text");
    }

    #[test]
    fn test_all_blank_pages_join_to_empty_string() {
        // The caller's minimum-length check turns this into NoExtractableText.
        let pages = vec!["".to_string(), "  ".to_string()];
        assert_eq!(join_pages(&pages).unwrap(), "");
    }
}
