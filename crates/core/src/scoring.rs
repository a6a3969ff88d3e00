//! Heuristic condition scoring.
//!
//! Scores are additive keyword-overlap counts, not probabilities:
//! `hits * keyword - negative_hits * negative + (age in band ? age : 0)`, clamped at zero.

use crate::rules::Condition;
use crate::tokens::SymptomTokens;

impl Condition {
    /// Number of this condition's keywords present in `tokens`.
    pub fn keyword_hits(&self, tokens: &SymptomTokens) -> usize {
        self.keywords.iter().filter(|k| tokens.contains(k)).count()
    }

    /// Number of this condition's negative keywords present in `tokens`.
    pub fn negative_hits(&self, tokens: &SymptomTokens) -> usize {
        self.negative_keywords
            .iter()
            .filter(|k| tokens.contains(k))
            .count()
    }
}

/// Computes the non-negative match score of `condition`.
///
/// `duration_days` is accepted so callers can pass it through unchanged, but no
/// current rule uses it and it has no effect on the score.
pub fn score_condition(
    condition: &Condition,
    tokens: &SymptomTokens,
    age: u32,
    duration_days: Option<u32>,
) -> f64 {
    let _ = duration_days;

    let mut score = 0.0;

    if !condition.keywords.is_empty() {
        score += condition.keyword_hits(tokens) as f64 * condition.weights.keyword;
    }

    if !condition.negative_keywords.is_empty() {
        score -= condition.negative_hits(tokens) as f64 * condition.weights.negative;
    }

    if let Some(band) = condition.age_band {
        if band.contains(age) {
            score += condition.weights.age;
        }
    }

    score.max(0.0)
}
