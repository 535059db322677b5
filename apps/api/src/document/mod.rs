//! Document-to-plain-text conversion.
//!
//! Sits in front of the extraction core: the core only ever sees a `&str`.
//! Format problems surface here as `UnsupportedFormat`, broken files as
//! `DocumentDecode`.

mod docx;

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::debug;

use crate::extraction::error::ExtractionError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// MIME type first (parameters ignored), then file extension.
    /// `application/octet-stream` counts as no MIME type.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty() && m != "application/octet-stream");

        if let Some(mime) = mime.as_deref() {
            return match mime {
                PDF_MIME => Ok(DocumentFormat::Pdf),
                DOCX_MIME => Ok(DocumentFormat::Docx),
                TEXT_MIME => Ok(DocumentFormat::PlainText),
                other => Err(ExtractionError::UnsupportedFormat(format!(
                    "'{other}' is not supported; upload a PDF or DOCX file"
                ))),
            };
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some("txt") => Ok(DocumentFormat::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(format!(
                "cannot determine format of '{}'; upload a PDF or DOCX file",
                file_name.unwrap_or("<unnamed>")
            ))),
        }
    }
}

pub fn to_plain_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => pdf_to_text(bytes)?,
        DocumentFormat::Docx => docx::extract_text(bytes)?,
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };
    debug!("Converted {:?} document: {} bytes -> {} chars", format, bytes.len(), text.len());
    Ok(text)
}

fn pdf_to_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !looks_like_pdf(bytes) {
        return Err(ExtractionError::DocumentDecode(
            "missing %PDF header".to_string(),
        ));
    }

    // pdf-extract can panic on malformed font tables.
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::DocumentDecode(format!(
            "failed to extract text from PDF: {e}"
        ))),
        Err(_) => Err(ExtractionError::DocumentDecode(
            "PDF extractor panicked on this file".to_string(),
        )),
    }
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace() && *b != 0)
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"%PDF")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_mime() {
        assert_eq!(
            DocumentFormat::detect(Some(PDF_MIME), Some("cv.bin")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(Some(DOCX_MIME), None).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::detect(Some("text/plain; charset=utf-8"), None).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_detect_by_extension_when_mime_is_generic() {
        assert_eq!(
            DocumentFormat::detect(Some("application/octet-stream"), Some("Resume.PDF")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(None, Some("cv.docx")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_mime() {
        let err = DocumentFormat::detect(Some("image/png"), Some("cv.pdf")).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_unknown_extension() {
        let err = DocumentFormat::detect(None, Some("cv.odt")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
        let err = DocumentFormat::detect(None, None).unwrap_err();
        assert!(err.to_string().contains("<unnamed>"));
    }

    #[test]
    fn test_plain_text_is_lossy_utf8() {
        let text = to_plain_text(b"Jane \xff Doe", DocumentFormat::PlainText).unwrap();
        assert!(text.starts_with("Jane "));
        assert!(text.ends_with(" Doe"));
    }

    #[test]
    fn test_non_pdf_bytes_rejected_before_parsing() {
        let err = to_plain_text(b"hello", DocumentFormat::Pdf).unwrap_err();
        assert_eq!(err, ExtractionError::DocumentDecode("missing %PDF header".to_string()));
    }

    #[test]
    fn test_pdf_header_detection_skips_leading_whitespace() {
        assert!(looks_like_pdf(b"\n  %PDF-1.7"));
        assert!(!looks_like_pdf(b""));
    }
}
