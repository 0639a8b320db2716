//! Resume text extraction.
//!
//! Pulls the plain text out of an uploaded PDF entirely in memory. Pages
//! without extractable text contribute nothing; only a byte stream that is
//! not a valid PDF fails the operation.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable PDF document: {0}")]
    InvalidPdf(String),
}

/// Extracts the concatenated text of every page of `bytes`, trimmed of
/// leading and trailing whitespace.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;

    let text = text.trim().to_string();
    debug!("Extracted {} characters of resume text", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::pdf_with_pages;

    #[test]
    fn extracts_pages_in_order_and_trims() {
        let bytes = pdf_with_pages(&["First page alpha", "Second page beta"]);
        let text = extract_resume_text(&bytes).unwrap();

        let alpha = text.find("First page alpha").expect("page 1 text missing");
        let beta = text.find("Second page beta").expect("page 2 text missing");
        assert!(alpha < beta, "pages out of order");
        assert_eq!(text, text.trim());
    }

    #[test]
    fn page_without_text_does_not_fail_extraction() {
        // Middle page carries no text at all.
        let bytes = pdf_with_pages(&["before", "", "after"]);
        let text = extract_resume_text(&bytes).unwrap();
        assert!(text.contains("before"));
        assert!(text.contains("after"));
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = extract_resume_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPdf(_)));
    }
}
