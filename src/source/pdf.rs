// file: src/source/pdf.rs
// description: turns fetched gazette bytes into raw document text
// reference: https://docs.rs/pdf-extract

use crate::error::{MonitorError, Result};
use crate::models::RawDocumentText;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF";

pub trait DocumentSource {
    /// Extracts the text of `bytes`; failures are `MonitorError::Extraction`, never empty text.
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<RawDocumentText>;
}

/// Text layer extraction with `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for PdfTextSource {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<RawDocumentText> {
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(MonitorError::extraction(name, "not a PDF file"));
        }

        // pdf-extract can panic on malformed documents
        let text = match catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        })) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(MonitorError::extraction(name, e.to_string())),
            Err(_) => {
                return Err(MonitorError::extraction(
                    name,
                    "PDF parser panicked (malformed PDF)",
                ));
            }
        };

        if text.trim().is_empty() {
            warn!("{} has no text layer", name);
        }
        debug!("Extracted {} chars from {}", text.len(), name);

        Ok(RawDocumentText::new(name, text).with_source_bytes(bytes))
    }
}

/// UTF-8 text files, for scanning gazettes that were already converted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl DocumentSource for PlainTextSource {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<RawDocumentText> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MonitorError::extraction(name, format!("invalid UTF-8: {}", e)))?;
        Ok(RawDocumentText::new(name, text).with_source_bytes(bytes))
    }
}

/// Picks the PDF extractor for PDF bytes and plain text otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoSource;

impl DocumentSource for AutoSource {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<RawDocumentText> {
        if bytes.starts_with(PDF_MAGIC) || name.to_lowercase().ends_with(".pdf") {
            PdfTextSource.extract(name, bytes)
        } else {
            PlainTextSource.extract(name, bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfTextSource::new()
            .extract("fake.pdf", b"<html>not found</html>")
            .unwrap_err();

        assert!(matches!(err, MonitorError::Extraction { .. }));
        assert!(err.to_string().contains("fake.pdf"));
    }

    #[test]
    fn test_truncated_pdf_is_an_extraction_failure() {
        let result = PdfTextSource::new().extract("broken.pdf", b"%PDF-1.7\n%%EOF");
        assert!(matches!(result, Err(MonitorError::Extraction { .. })));
    }

    #[test]
    fn test_plain_text_source() {
        let doc = PlainTextSource
            .extract("edicao.txt", "PORTARIA Nº 1\nEducação\n".as_bytes())
            .unwrap();

        assert_eq!(doc.text(), "PORTARIA Nº 1\nEducação\n");
        assert!(doc.source_hash().is_some());
        assert!(PlainTextSource.extract("bad.txt", &[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_auto_source_routes_by_content() {
        let doc = AutoSource.extract("edicao.txt", b"ATO N\xc2\xba 1\n").unwrap();
        assert_eq!(doc.text(), "ATO Nº 1\n");

        let err = AutoSource.extract("edicao.pdf", b"plain text").unwrap_err();
        assert!(matches!(err, MonitorError::Extraction { .. }));
    }
}
