// file: src/models/document.rs
// description: extracted gazette text as handed to the segmenter
// reference: internal data structures

use sha2::{Digest, Sha256};

/// Full text of one gazette edition, as produced by a document source.
#[derive(Debug, Clone)]
pub struct RawDocumentText {
    name: String,
    text: String,
    source_hash: Option<String>,
}

impl RawDocumentText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            source_hash: None,
        }
    }

    /// Records the SHA-256 of the bytes the text was extracted from.
    pub fn with_source_bytes(mut self, bytes: &[u8]) -> Self {
        self.source_hash = Some(compute_hash(bytes));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_hash(&self) -> Option<&str> {
        self.source_hash.as_deref()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = RawDocumentText::new("DOTCECE_12-140.pdf", "PORTARIA Nº 1\nTexto\n");

        assert_eq!(doc.name(), "DOTCECE_12-140.pdf");
        assert_eq!(doc.line_count(), 2);
        assert!(!doc.is_blank());
        assert!(doc.source_hash().is_none());
    }

    #[test]
    fn test_source_hash() {
        let doc = RawDocumentText::new("a.pdf", "").with_source_bytes(b"%PDF-1.7");
        let hash = doc.source_hash().unwrap();

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, compute_hash(b"%PDF-1.7"));
        assert!(doc.is_blank());
    }
}
