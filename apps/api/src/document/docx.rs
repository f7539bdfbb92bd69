//! DOC/DOCX text extraction via `docx-rs`.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use tracing::debug;

use super::ExtractionError;

/// Decodes a paragraph-structured Word document and concatenates paragraph
/// text in document order, newline-separated.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(bytes).map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for para_child in &paragraph.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    debug!(paragraph_count = paragraphs.len(), "DOCX decoded");
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    /// Builds an in-memory DOCX with one paragraph per input line.
    pub(crate) fn docx_bytes(text: &str) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in text.lines() {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
        }
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    #[test]
    fn test_paragraphs_concatenate_in_document_order() {
        let bytes = docx_bytes("alpha\nbeta\ngamma");
        let text = extract(&bytes).unwrap();
        let alpha = text.find("alpha").unwrap();
        let beta = text.find("beta").unwrap();
        let gamma = text.find("gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn test_empty_docx_extracts_empty_text() {
        let bytes = docx_bytes("");
        let text = extract(&bytes).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_invalid_archive_is_unreadable() {
        let result = extract(b"\x00\x01\x02\x03");
        assert!(matches!(result, Err(ExtractionError::Unreadable(_))));
    }
}
