use thiserror::Error;

/// Failures raised by the extraction core and the document converter.
///
/// A field with no match is never an error; extractors report it as `None`
/// or an empty list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tagging unavailable: {0}")]
    TaggingUnavailable(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Document decode failed: {0}")]
    DocumentDecode(String),
}

impl ExtractionError {
    /// Stable machine-readable code, used in per-field failures and HTTP bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::InvalidInput(_) => "INVALID_INPUT",
            ExtractionError::TaggingUnavailable(_) => "TAGGING_UNAVAILABLE",
            ExtractionError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ExtractionError::DocumentDecode(_) => "DOCUMENT_DECODE_ERROR",
        }
    }
}
