//! Part-of-speech tagging boundary.
//!
//! Name recognition only depends on the `PosTagger` trait. `HeuristicTagger`
//! is the built-in backend: Unicode word segmentation plus a closed-class
//! lexicon and capitalisation rules. Any model-backed tagger can be swapped in
//! by implementing the trait.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::extraction::error::ExtractionError;

/// Coarse grammatical category assigned to a token.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Numeral,
    Punctuation,
    /// Line breaks. Kept as tokens so they split proper-noun runs.
    Space,
    Other,
}

/// A tagged token. `start`/`end` are byte offsets into the tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub pos: PosTag,
}

impl Token {
    pub fn new(text: &str, start: usize, pos: PosTag) -> Self {
        Self {
            text: text.to_string(),
            start,
            end: start + text.len(),
            pos,
        }
    }
}

/// The tagging capability. Implement this to swap backends without touching
/// the name recognizer.
pub trait PosTagger: Send + Sync {
    /// Backend label, surfaced in logs.
    fn name(&self) -> &'static str;

    /// Tags every token of `text` in order.
    fn tag(&self, text: &str) -> Result<Vec<Token>, ExtractionError>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who", "whom",
    "whose", "which", "what",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "about", "after", "before", "between", "during", "through", "within", "without", "across",
    "via", "per", "since", "until", "upon", "among",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "if", "because", "while", "although", "though",
    "whereas",
];

// "will" and "may" are left out: both are common first names.
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "can", "could", "shall", "should", "would", "might", "must",
];

static CLOSED_CLASS: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut lexicon = HashMap::new();
    let groups: [(&[&str], PosTag); 5] = [
        (DETERMINERS, PosTag::Determiner),
        (PRONOUNS, PosTag::Pronoun),
        (PREPOSITIONS, PosTag::Preposition),
        (CONJUNCTIONS, PosTag::Conjunction),
        (AUXILIARIES, PosTag::Auxiliary),
    ];
    for (words, tag) in groups {
        for &word in words {
            lexicon.entry(word).or_insert(tag);
        }
    }
    lexicon
});

/// Rule-based tagger. Fast and deterministic, no model download.
///
/// Rules, in order:
/// 1. whitespace containing a line break → `Space`, other whitespace is skipped
/// 2. no alphanumeric character → `Punctuation`
/// 3. leading digit → `Numeral`
/// 4. closed-class lexicon hit (case-insensitive) → that class
/// 5. capitalised or all-caps word → `ProperNoun`
/// 6. anything else → `Noun`
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl PosTagger for HeuristicTagger {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn tag(&self, text: &str) -> Result<Vec<Token>, ExtractionError> {
        let mut tokens = Vec::new();
        for (offset, segment) in text.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                if segment.contains(['\n', '\r']) {
                    tokens.push(Token::new(segment, offset, PosTag::Space));
                }
                continue;
            }
            tokens.push(Token::new(segment, offset, classify(segment)));
        }
        Ok(tokens)
    }
}

fn classify(word: &str) -> PosTag {
    if !word.chars().any(char::is_alphanumeric) {
        return PosTag::Punctuation;
    }
    if word.chars().next().is_some_and(|c| c.is_numeric()) {
        return PosTag::Numeral;
    }
    if let Some(&tag) = CLOSED_CLASS.get(word.to_lowercase().as_str()) {
        return tag;
    }
    if is_capitalised_word(word) {
        return PosTag::ProperNoun;
    }
    PosTag::Noun
}

fn is_capitalised_word(word: &str) -> bool {
    let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '\u{2019}' | '.' | '-'))
}
