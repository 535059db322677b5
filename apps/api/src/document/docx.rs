use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use crate::extraction::error::ExtractionError;

const DOC_XML_PATH: &str = "word/document.xml";
const PARAGRAPH_TAG: &[u8] = b"w:p";
const TEXT_TAG: &[u8] = b"w:t";
const TAB_TAG: &[u8] = b"w:tab";
const BREAK_TAG: &[u8] = b"w:br";
const CARRIAGE_RETURN_TAG: &[u8] = b"w:cr";

/// Text of `word/document.xml`, one line per paragraph.
pub(super) fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractionError::DocumentDecode(format!("failed to open docx archive: {e}"))
    })?;

    let mut file = archive.by_name(DOC_XML_PATH).map_err(|e| {
        ExtractionError::DocumentDecode(format!("docx missing {DOC_XML_PATH}: {e}"))
    })?;

    let mut xml = String::new();
    file.read_to_string(&mut xml).map_err(|e| {
        ExtractionError::DocumentDecode(format!("failed to read {DOC_XML_PATH}: {e}"))
    })?;

    paragraphs_to_text(&xml)
}

/// Only `w:t` runs carry visible text. Deleted runs (`w:delText`) and field
/// codes (`w:instrText`) are skipped; `w:tab` becomes a tab and `w:br`/`w:cr`
/// a line break.
fn paragraphs_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = XmlReader::from_str(xml);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                PARAGRAPH_TAG => {
                    in_paragraph = true;
                    current.clear();
                }
                TEXT_TAG => in_text_run = in_paragraph,
                _ => (),
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                PARAGRAPH_TAG => {
                    in_paragraph = false;
                    in_text_run = false;
                    lines.push(current.trim().to_string());
                    current.clear();
                }
                TEXT_TAG => in_text_run = false,
                _ => (),
            },
            Ok(Event::Empty(e)) if in_paragraph => match e.name().as_ref() {
                TAB_TAG => current.push('\t'),
                BREAK_TAG | CARRIAGE_RETURN_TAG => current.push('\n'),
                _ => (),
            },
            Ok(Event::Text(t)) if in_text_run => {
                let content = t.unescape().map_err(|e| {
                    ExtractionError::DocumentDecode(format!("bad text run in docx: {e}"))
                })?;
                current.push_str(&content);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::DocumentDecode(format!(
                    "malformed docx xml at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => (),
        }
    }

    Ok(lines.join("\n").trim().to_string())
}
