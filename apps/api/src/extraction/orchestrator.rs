//! Runs every extractor over one document and assembles the `ExtractionResult`.
//!
//! Failure policy: a field that fails is recorded in `field_errors` and left
//! absent; the remaining fields are still extracted. Document conversion
//! errors are not recovered and are returned as-is.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::document::{self, DocumentFormat};
use crate::extraction::error::ExtractionError;
use crate::extraction::fields::{
    extract_contact_number, extract_education, extract_email, extract_skills,
};
use crate::extraction::models::{ExtractionResult, FactKind, FieldFailure};
use crate::extraction::names::NameRecognizer;
use crate::extraction::patterns::PatternLibrary;
use crate::extraction::scoring::{remaining_skills, summarize};
use crate::extraction::tagger::{HeuristicTagger, PosTagger};
use crate::extraction::vocabulary::SkillVocabulary;

#[derive(Clone)]
pub struct ResumeExtractor {
    patterns: Arc<PatternLibrary>,
    vocabulary: SkillVocabulary,
    names: NameRecognizer,
}

impl ResumeExtractor {
    pub fn new(
        patterns: Arc<PatternLibrary>,
        vocabulary: SkillVocabulary,
        tagger: Arc<dyn PosTagger>,
    ) -> Self {
        Self {
            patterns,
            vocabulary,
            names: NameRecognizer::new(tagger),
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Same patterns and tagger, different vocabulary.
    pub fn with_vocabulary(&self, vocabulary: SkillVocabulary) -> Self {
        Self {
            patterns: Arc::clone(&self.patterns),
            vocabulary,
            names: self.names.clone(),
        }
    }

    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut field_errors = Vec::new();

        let name = self
            .names
            .recognize(text, &self.patterns.name_templates)
            .unwrap_or_else(|e| {
                warn!("Name recognition failed ({}): {e}", self.names.tagger_name());
                field_errors.push(FieldFailure::new(FactKind::PersonName, &e));
                None
            });

        let contact_number = extract_contact_number(text, &self.patterns);
        let email = extract_email(text, &self.patterns);
        let skills = extract_skills(text, &self.vocabulary);
        let education = extract_education(text, &self.patterns);

        let entries = self.vocabulary.entries();
        let (score, score_display, score_breakdown) = match summarize(entries, &skills) {
            Ok(summary) => {
                debug!(
                    "Score {} ({}/{} skills)",
                    summary.display(),
                    summary.matched_count,
                    summary.vocabulary_size
                );
                (Some(summary.score), Some(summary.display()), Some(summary.breakdown))
            }
            Err(e) => {
                warn!("Scoring failed: {e}");
                field_errors.push(FieldFailure::new(FactKind::Score, &e));
                (None, None, None)
            }
        };

        info!(
            "Extracted: name={} contact={} email={} skills={}/{} education={} failures={}",
            name.is_some(),
            contact_number.is_some(),
            email.is_some(),
            skills.len(),
            entries.len(),
            education.len(),
            field_errors.len()
        );

        ExtractionResult {
            name,
            contact_number,
            email,
            remaining_skills: remaining_skills(entries, &skills),
            skills,
            education,
            score,
            score_display,
            score_breakdown,
            field_errors,
        }
    }

    /// Converts a raw document, then extracts. Conversion errors
    /// (`UnsupportedFormat`, `DocumentDecode`) propagate unchanged.
    pub fn extract_document(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<ExtractionResult, ExtractionError> {
        let text = document::to_plain_text(bytes, format)?;
        Ok(self.extract(&text))
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new(
            Arc::new(PatternLibrary::builtin().clone()),
            SkillVocabulary::default(),
            Arc::new(HeuristicTagger),
        )
    }
}
