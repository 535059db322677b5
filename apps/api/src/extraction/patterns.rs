//! Recognizer definitions held as data.
//!
//! Every regex is a named, versioned `PatternDef`; `PatternLibrary` compiles
//! them once. Extractors only borrow the compiled library, so patterns can be
//! tested and replaced without touching extraction control flow.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extraction::error::ExtractionError;
use crate::extraction::tagger::PosTag;

/// Bumped whenever any built-in pattern, template or the default vocabulary changes.
pub const PATTERN_LIBRARY_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternDef {
    pub name: &'static str,
    pub version: u32,
    pub source: &'static str,
}

/// Optional `+CC` or bare country code, an area code with or without
/// parentheses, then 3 + 4 digits. Separators (`-`, `.`, whitespace) are
/// optional and may differ within one number.
pub const CONTACT_NUMBER: PatternDef = PatternDef {
    name: "contact_number",
    version: 1,
    source: r"(?:\+\d{1,3}[-.\s]?|\b\d{1,3}[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
};

pub const EMAIL: PatternDef = PatternDef {
    name: "email",
    version: 1,
    source: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
};

/// Degree indicator followed by a greedy run of word tokens.
/// Abbreviations may keep their trailing period (`B.Sc.`, `Ph.D.`) or run
/// straight into the field (`Ph.D.Physics`).
pub const EDUCATION: PatternDef = PatternDef {
    name: "education",
    version: 2,
    source: r"(?i)(?:\bBsc\b|\bB\.\w+\.?|\bM\.\w+\.?|\bPh\.D\.\w+|\bPh\.D\.?|\bBachelor(?:'s)?|\bMaster(?:'s)?)\s(?:\w+\s)*\w+",
};

pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Data Analysis",
    "Machine Learning",
    "AWS",
    "Time Series Analysis",
    "Deep Learning",
    "SQL",
    "Natural Language Processing",
    "Descriptive Statistics",
    "Inferential Statistics",
    "Docker",
];

pub const DEFAULT_NAME_TEMPLATE_LENGTHS: &[usize] = &[2, 3, 4];

/// Accepted proper-noun run lengths for a name template.
pub const NAME_TEMPLATE_LENGTHS: RangeInclusive<usize> = 2..=4;

/// A part-of-speech sequence that a person name must match, token for token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameTemplate {
    pub name: String,
    pub sequence: Vec<PosTag>,
}

impl NameTemplate {
    /// `len` consecutive proper nouns.
    pub fn proper_nouns(len: usize) -> Self {
        Self {
            name: format!("propn_x{len}"),
            sequence: vec![PosTag::ProperNoun; len],
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Compiled recognizers plus the ordered name templates.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    pub version: u32,
    pub contact_number: Regex,
    pub email: Regex,
    pub education: Regex,
    /// Tried in declared order; the first template matching anywhere wins.
    pub name_templates: Vec<NameTemplate>,
}

static BUILTIN: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::compile(
        CONTACT_NUMBER,
        EMAIL,
        EDUCATION,
        default_name_templates(),
    )
    .expect("built-in patterns compile")
});

impl PatternLibrary {
    pub fn compile(
        contact_number: PatternDef,
        email: PatternDef,
        education: PatternDef,
        name_templates: Vec<NameTemplate>,
    ) -> Result<Self, ExtractionError> {
        if let Some(bad) = name_templates
            .iter()
            .find(|t| !NAME_TEMPLATE_LENGTHS.contains(&t.len()))
        {
            return Err(ExtractionError::InvalidInput(format!(
                "name template '{}' has {} tokens, expected {}..={}",
                bad.name,
                bad.len(),
                NAME_TEMPLATE_LENGTHS.start(),
                NAME_TEMPLATE_LENGTHS.end()
            )));
        }
        Ok(Self {
            version: PATTERN_LIBRARY_VERSION,
            contact_number: compile_def(&contact_number)?,
            email: compile_def(&email)?,
            education: compile_def(&education)?,
            name_templates,
        })
    }

    /// The shared built-in library.
    pub fn builtin() -> &'static PatternLibrary {
        &BUILTIN
    }

    /// Built-in regexes with a caller-chosen template order.
    pub fn with_name_templates(name_templates: Vec<NameTemplate>) -> Result<Self, ExtractionError> {
        Self::compile(CONTACT_NUMBER, EMAIL, EDUCATION, name_templates)
    }
}

pub fn default_name_templates() -> Vec<NameTemplate> {
    DEFAULT_NAME_TEMPLATE_LENGTHS
        .iter()
        .map(|&len| NameTemplate::proper_nouns(len))
        .collect()
}

fn compile_def(def: &PatternDef) -> Result<Regex, ExtractionError> {
    Regex::new(def.source).map_err(|e| {
        ExtractionError::InvalidInput(format!(
            "pattern '{}' v{} failed to compile: {e}",
            def.name, def.version
        ))
    })
}
