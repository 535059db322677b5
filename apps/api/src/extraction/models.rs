use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::extraction::error::ExtractionError;
use crate::extraction::scoring::ScoreBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    PersonName,
    ContactNumber,
    Email,
    Skill,
    EducationEntry,
    Score,
}

/// One structured fact found in a document. Serialises as `{kind, value}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedFact {
    PersonName(String),
    ContactNumber(String),
    Email(String),
    Skill(String),
    EducationEntry(String),
}

impl ExtractedFact {
    pub fn kind(&self) -> FactKind {
        match self {
            ExtractedFact::PersonName(_) => FactKind::PersonName,
            ExtractedFact::ContactNumber(_) => FactKind::ContactNumber,
            ExtractedFact::Email(_) => FactKind::Email,
            ExtractedFact::Skill(_) => FactKind::Skill,
            ExtractedFact::EducationEntry(_) => FactKind::EducationEntry,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ExtractedFact::PersonName(v)
            | ExtractedFact::ContactNumber(v)
            | ExtractedFact::Email(v)
            | ExtractedFact::Skill(v)
            | ExtractedFact::EducationEntry(v) => v,
        }
    }
}

#[derive(Serialize)]
struct FactEntry<'a> {
    kind: FactKind,
    value: &'a str,
}

impl Serialize for ExtractedFact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FactEntry {
            kind: self.kind(),
            value: self.value(),
        }
        .serialize(serializer)
    }
}

/// A field whose extractor failed. The field's value is absent in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: FactKind,
    pub code: String,
    pub message: String,
}

impl FieldFailure {
    pub fn new(field: FactKind, error: &ExtractionError) -> Self {
        Self {
            field,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Everything extracted from one document. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    /// Vocabulary order.
    pub skills: Vec<String>,
    /// Order of appearance, duplicates kept.
    pub education: Vec<String>,
    /// 0–100. Absent only when scoring failed (see `field_errors`).
    pub score: Option<f64>,
    /// `score` with two decimals, e.g. `66.67%`.
    pub score_display: Option<String>,
    pub score_breakdown: Option<ScoreBreakdown>,
    pub remaining_skills: BTreeSet<String>,
    pub field_errors: Vec<FieldFailure>,
}

impl ExtractionResult {
    /// All present facts: name, contact number, email, skills, education.
    pub fn facts(&self) -> Vec<ExtractedFact> {
        let mut facts = Vec::new();
        facts.extend(self.name.clone().map(ExtractedFact::PersonName));
        facts.extend(self.contact_number.clone().map(ExtractedFact::ContactNumber));
        facts.extend(self.email.clone().map(ExtractedFact::Email));
        facts.extend(self.skills.iter().cloned().map(ExtractedFact::Skill));
        facts.extend(self.education.iter().cloned().map(ExtractedFact::EducationEntry));
        facts
    }
}
