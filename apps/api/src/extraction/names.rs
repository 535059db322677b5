//! Person-name recovery from part-of-speech structure.
//!
//! Names are an open vocabulary, so instead of a lexicon the recognizer looks
//! for runs of proper nouns described by the library's `NameTemplate`s.

use std::sync::Arc;

use tracing::debug;

use crate::extraction::error::ExtractionError;
use crate::extraction::patterns::NameTemplate;
use crate::extraction::tagger::{PosTagger, Token};

#[derive(Clone)]
pub struct NameRecognizer {
    tagger: Arc<dyn PosTagger>,
}

impl NameRecognizer {
    pub fn new(tagger: Arc<dyn PosTagger>) -> Self {
        Self { tagger }
    }

    pub fn tagger_name(&self) -> &'static str {
        self.tagger.name()
    }

    /// Tags the whole document, then tries each template in declared order
    /// against the entire token stream. The first template with any hit wins,
    /// even if a later template would match earlier in the text.
    ///
    /// Blank text is `Ok(None)`. Non-blank text that yields no tokens is
    /// `TaggingUnavailable`, never a silent `None`.
    pub fn recognize(
        &self,
        text: &str,
        templates: &[NameTemplate],
    ) -> Result<Option<String>, ExtractionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let tokens = self.tagger.tag(text)?;
        if tokens.is_empty() {
            return Err(ExtractionError::TaggingUnavailable(format!(
                "tagger '{}' returned no tokens for non-empty text",
                self.tagger.name()
            )));
        }

        for template in templates {
            if let Some(run) = find_run(&tokens, template) {
                debug!(
                    "Name template '{}' matched at byte {}",
                    template.name, run[0].start
                );
                return Ok(Some(span_text(text, run)));
            }
        }
        Ok(None)
    }
}

/// First window of tokens whose tags equal the template sequence.
fn find_run<'t>(tokens: &'t [Token], template: &NameTemplate) -> Option<&'t [Token]> {
    if template.is_empty() {
        return None;
    }
    tokens.windows(template.len()).find(|window| {
        window
            .iter()
            .zip(&template.sequence)
            .all(|(token, tag)| token.pos == *tag)
    })
}

/// The source slice covering the run. Falls back to the token texts joined by
/// single spaces when a backend reports offsets that do not fit the text.
fn span_text(text: &str, run: &[Token]) -> String {
    let (first, last) = (&run[0], &run[run.len() - 1]);
    match text.get(first.start..last.end) {
        Some(slice) => slice.to_string(),
        None => run
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
