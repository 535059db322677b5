use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::extraction::error::ExtractionError;

/// Matched vs remaining share of the vocabulary, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub matched_share: f64,
    pub remaining_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: f64,
    pub matched_count: usize,
    pub vocabulary_size: usize,
    pub breakdown: ScoreBreakdown,
}

impl ScoreSummary {
    /// Two-decimal percentage, e.g. `66.67%`.
    pub fn display(&self) -> String {
        format!("{:.2}%", self.score)
    }
}

/// `100 * |matched| / |vocabulary|`.
///
/// Fails with `InvalidInput` on an empty vocabulary or when a matched skill is
/// not a vocabulary entry. Repeated matched entries count once.
pub fn calculate_score(vocabulary: &[String], matched: &[String]) -> Result<f64, ExtractionError> {
    if vocabulary.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "cannot score against an empty skills vocabulary".to_string(),
        ));
    }

    let known: HashSet<&str> = vocabulary.iter().map(String::as_str).collect();
    if let Some(stray) = matched.iter().find(|m| !known.contains(m.as_str())) {
        return Err(ExtractionError::InvalidInput(format!(
            "matched skill '{stray}' is not in the vocabulary"
        )));
    }

    let distinct: HashSet<&str> = matched.iter().map(String::as_str).collect();
    Ok(100.0 * distinct.len() as f64 / vocabulary.len() as f64)
}

/// Vocabulary entries not matched: the skills to develop.
pub fn remaining_skills(vocabulary: &[String], matched: &[String]) -> BTreeSet<String> {
    let matched: HashSet<&str> = matched.iter().map(String::as_str).collect();
    vocabulary
        .iter()
        .filter(|skill| !matched.contains(skill.as_str()))
        .cloned()
        .collect()
}

pub fn summarize(vocabulary: &[String], matched: &[String]) -> Result<ScoreSummary, ExtractionError> {
    let score = calculate_score(vocabulary, matched)?;
    Ok(ScoreSummary {
        score,
        matched_count: matched.iter().collect::<HashSet<_>>().len(),
        vocabulary_size: vocabulary.len(),
        breakdown: ScoreBreakdown {
            matched_share: score,
            remaining_share: 100.0 - score,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_of_three() {
        let vocab = strings(&["Python", "SQL", "Docker"]);
        let score = calculate_score(&vocab, &strings(&["Python", "SQL"])).unwrap();
        assert!((score - 66.666_666).abs() < 0.001, "Score was {score}");
    }

    #[test]
    fn test_full_and_zero() {
        let vocab = strings(&["Python", "SQL"]);
        assert_eq!(calculate_score(&vocab, &vocab).unwrap(), 100.0);
        assert_eq!(calculate_score(&vocab, &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_vocabulary_is_invalid_input() {
        let err = calculate_score(&[], &[]).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
    }

    #[test]
    fn test_stray_match_is_invalid_input() {
        let vocab = strings(&["Python"]);
        let err = calculate_score(&vocab, &strings(&["Rust"])).unwrap_err();
        assert!(err.to_string().contains("'Rust'"));
    }

    #[test]
    fn test_repeated_match_counts_once() {
        let vocab = strings(&["Python", "SQL"]);
        let score = calculate_score(&vocab, &strings(&["SQL", "SQL"])).unwrap();
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_score_formula_over_all_subsets() {
        let vocab = strings(&["A", "B", "C", "D"]);
        for mask in 0u32..16 {
            let subset: Vec<String> = vocab
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s.clone())
                .collect();
            let score = calculate_score(&vocab, &subset).unwrap();
            assert_eq!(score, 100.0 * subset.len() as f64 / 4.0);

            let remaining = remaining_skills(&vocab, &subset);
            assert_eq!(remaining.len(), 4 - subset.len());
            assert!(subset.iter().all(|s| !remaining.contains(s)));
        }
    }

    #[test]
    fn test_remaining_skills_is_set_difference() {
        let vocab = strings(&["Python", "SQL", "Docker"]);
        let remaining = remaining_skills(&vocab, &strings(&["Python", "SQL"]));
        assert_eq!(remaining, BTreeSet::from(["Docker".to_string()]));
    }

    #[test]
    fn test_remaining_skills_dedupes_vocabulary() {
        let vocab = strings(&["Docker", "Docker", "SQL"]);
        let remaining = remaining_skills(&vocab, &strings(&["SQL"]));
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn test_summary_breakdown_and_display() {
        let vocab = strings(&["Python", "SQL", "Docker"]);
        let summary = summarize(&vocab, &strings(&["Python", "SQL"])).unwrap();
        assert_eq!(summary.display(), "66.67%");
        assert_eq!(summary.matched_count, 2);
        assert_eq!(summary.vocabulary_size, 3);
        let total = summary.breakdown.matched_share + summary.breakdown.remaining_share;
        assert!((total - 100.0).abs() < 1e-9);
    }
}
