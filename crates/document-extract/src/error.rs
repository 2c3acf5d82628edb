use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("Package part {part} exceeds {limit} bytes uncompressed")]
    PartTooLarge { part: String, limit: u64 },

    #[error("Legacy binary workbook (.{0}) is not supported")]
    UnsupportedLegacyFormat(String),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

pub(crate) fn xml_error(part: &str, err: impl std::fmt::Display) -> ExtractError {
    ExtractError::Xml {
        part: part.to_string(),
        message: err.to_string(),
    }
}
