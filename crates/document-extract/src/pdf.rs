//! PDF extraction via lopdf

use std::path::Path;

use lopdf::Document as PdfDocument;
use shared_types::{Document, DocumentKind, Extractor};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn read(&self, path: &Path) -> ExtractResult<Document> {
        let pdf = PdfDocument::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
        Self::to_document(&pdf)
    }

    pub fn read_mem(&self, bytes: &[u8]) -> ExtractResult<Document> {
        let pdf = PdfDocument::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
        Self::to_document(&pdf)
    }

    /// One text block per page, in page order
    fn to_document(pdf: &PdfDocument) -> ExtractResult<Document> {
        let pages = pdf.get_pages();
        let mut page_texts = Vec::with_capacity(pages.len());

        for page_number in pages.keys() {
            let text = pdf
                .extract_text(&[*page_number])
                .map_err(|e| ExtractError::Pdf(format!("page {}: {}", page_number, e)))?;
            page_texts.push(text);
        }

        debug!("Extracted text from {} PDF pages", pages.len());

        Ok(Document::new(DocumentKind::Pdf, page_texts.join("\n"))
            .with_page_count(pages.len() as u32))
    }
}

impl Extractor for PdfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn extract(&self, path: &Path) -> anyhow::Result<Document> {
        Ok(self.read(path)?)
    }
}
