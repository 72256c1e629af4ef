use thiserror::Error;

/// Form feed, emitted between pages by the PDF text decoder.
const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not decode PDF: {0}")]
    Decode(String),

    #[error("PDF decoder aborted: {0}")]
    Aborted(String),
}

/// Turns an uploaded document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError>;
}

/// `pdf-extract` backed extractor working entirely in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| PdfError::Decode(e.to_string()))?;
        Ok(join_pages(&raw))
    }
}

/// Concatenates page texts, skipping pages with no text and ending each kept
/// page with a newline.
fn join_pages(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .filter(|page| !page.trim().is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page);
            text.push('\n');
            text
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let raw = "Page one text\u{c}   \n\u{c}Page three text";
        assert_eq!(join_pages(raw), "Page one text\nPage three text\n");
    }

    #[test]
    fn test_join_pages_single_page() {
        assert_eq!(join_pages("Only page"), "Only page\n");
    }

    #[test]
    fn test_join_pages_all_blank() {
        assert_eq!(join_pages("\u{c}\u{c}  "), "");
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = PdfTextExtractor.extract_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Decode(_)));
        assert!(err.to_string().starts_with("could not decode PDF"));
    }
}
