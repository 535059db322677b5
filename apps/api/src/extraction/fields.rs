//! Pure per-field extractors. No I/O, no state; every function is a function
//! of the text and the knowledge base it is handed.

use tracing::debug;

use crate::extraction::patterns::PatternLibrary;
use crate::extraction::vocabulary::SkillVocabulary;

/// First phone-like match, verbatim. Separators are not normalised.
pub fn extract_contact_number(text: &str, patterns: &PatternLibrary) -> Option<String> {
    patterns
        .contact_number
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// First email match, verbatim (original casing).
pub fn extract_email(text: &str, patterns: &PatternLibrary) -> Option<String> {
    patterns.email.find(text).map(|m| m.as_str().to_string())
}

/// Vocabulary entries found in the text, in vocabulary order.
/// A skill mentioned several times is reported once.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    let skills: Vec<String> = vocabulary
        .iter()
        .filter(|(_, matcher)| matcher.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect();
    debug!("Skill extraction matched {}/{}", skills.len(), vocabulary.len());
    skills
}

/// Every non-overlapping degree phrase, trimmed, in order of appearance.
/// Not deduplicated.
pub fn extract_education(text: &str, patterns: &PatternLibrary) -> Vec<String> {
    patterns
        .education
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}
