//! Extraction capability shared by the engine and the format adapters

use std::path::Path;

use crate::types::{Document, DocumentKind};

/// Turns a file on disk into a normalized [`Document`].
///
/// One implementation exists per [`DocumentKind`]. Any failure is reported
/// through `anyhow` so callers can wrap the cause without knowing the
/// underlying parser's error types.
pub trait Extractor: Send + Sync {
    /// Document kind produced by this extractor
    fn kind(&self) -> DocumentKind;

    /// Read and normalize the file at `path`
    fn extract(&self, path: &Path) -> anyhow::Result<Document>;
}
