//! Text normalisation and symptom extraction.
//!
//! Turns free text into canonical tokens: lower-case, strip everything but ASCII
//! letters and whitespace, drop stopwords, then map synonyms through the rule set's
//! keyword normalisation table.

use crate::rules::RuleSet;
use crate::tokens::SymptomTokens;

impl RuleSet {
    /// Converts a raw text fragment into canonical tokens, preserving input order.
    ///
    /// Empty or all-punctuation input yields an empty vector.
    pub fn normalise(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.stopwords().contains(*token))
            .map(|token| {
                self.keyword_normalization()
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| token.to_string())
            })
            .collect()
    }

    /// Aggregates the tokens of every symptom fragment and the notes into one set.
    ///
    /// Fragments are processed in order and notes last, so the resulting set
    /// order is reproducible for a given input.
    pub fn extract<S: AsRef<str>>(&self, symptoms: &[S], notes: &str) -> SymptomTokens {
        let mut tokens = SymptomTokens::new();
        for fragment in symptoms {
            tokens.extend(self.normalise(fragment.as_ref()));
        }
        if !notes.is_empty() {
            tokens.extend(self.normalise(notes));
        }
        tokens
    }
}
