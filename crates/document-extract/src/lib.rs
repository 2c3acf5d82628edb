//! Format adapters producing normalized [`Document`](shared_types::Document)s
//!
//! One [`Extractor`] per document kind:
//! - [`DocxExtractor`] for word-processor packages
//! - [`PdfExtractor`] for PDFs
//! - [`SpreadsheetExtractor`] for zip-based workbooks

mod docx;
mod error;
mod package;
mod pdf;
mod spreadsheet;

pub use docx::DocxExtractor;
pub use error::{ExtractError, ExtractResult};
pub use pdf::PdfExtractor;
pub use spreadsheet::SpreadsheetExtractor;

use shared_types::Extractor;

/// One extractor for each supported document kind
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(DocxExtractor),
        Box::new(PdfExtractor),
        Box::new(SpreadsheetExtractor),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    use zip::write::FileOptions;
    use zip::ZipWriter;

    /// Write a zip package containing the given (part name, content) pairs
    pub fn write_package(path: &Path, parts: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, content) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
}
