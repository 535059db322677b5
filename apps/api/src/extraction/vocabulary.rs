use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::extraction::error::ExtractionError;
use crate::extraction::patterns::DEFAULT_SKILLS;

/// Ordered skill names with one pre-compiled whole-word matcher per entry.
///
/// Order is the display order of matched skills. Entries are unique: a repeat
/// (compared case-insensitively, like the matchers) is dropped in favour of its
/// first spelling, so every skill counts once in the scoring denominator.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<String>,
    matchers: Vec<Regex>,
}

impl SkillVocabulary {
    /// Builds a vocabulary. Fails on an empty list or a blank entry.
    pub fn new<I, S>(entries: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for entry in entries.into_iter().map(Into::into) {
            if seen.insert(entry.trim().to_lowercase()) {
                unique.push(entry);
            } else {
                debug!("Dropping duplicate vocabulary entry '{entry}'");
            }
        }
        let entries = unique;
        if entries.is_empty() {
            return Err(ExtractionError::InvalidInput(
                "skills vocabulary is empty".to_string(),
            ));
        }

        let matchers = entries
            .iter()
            .map(|skill| compile_skill(skill))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries, matchers })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries paired with their matchers, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.entries
            .iter()
            .map(String::as_str)
            .zip(self.matchers.iter())
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied()).expect("default vocabulary is valid")
    }
}

/// `\b<escaped skill>\b`, case-insensitive. Internal whitespace must match
/// literally, so multi-word skills need the contiguous phrase.
fn compile_skill(skill: &str) -> Result<Regex, ExtractionError> {
    if skill.trim().is_empty() {
        return Err(ExtractionError::InvalidInput(
            "skills vocabulary contains a blank entry".to_string(),
        ));
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(skill)))
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractionError::InvalidInput(format!("skill '{skill}' is not matchable: {e}")))
}
