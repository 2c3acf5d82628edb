use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of a path-based verification
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("File not found at '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported file format.")]
    UnsupportedFormat { extension: String },

    #[error("Error during {format_label} verification: {cause}")]
    ExtractionFailure {
        format_label: &'static str,
        cause: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationErrorKind {
    NotFound,
    UnsupportedFormat,
    ExtractionFailure,
}

impl VerificationError {
    pub fn kind(&self) -> VerificationErrorKind {
        match self {
            VerificationError::NotFound { .. } => VerificationErrorKind::NotFound,
            VerificationError::UnsupportedFormat { .. } => VerificationErrorKind::UnsupportedFormat,
            VerificationError::ExtractionFailure { .. } => VerificationErrorKind::ExtractionFailure,
        }
    }
}
