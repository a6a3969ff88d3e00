//! Canonical symptom tokens for one assessment.

use std::collections::HashSet;

/// An insertion-ordered set of canonical tokens.
///
/// The first occurrence of a token fixes its position; later duplicates are dropped.
/// Iteration order therefore depends only on the input, never on hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymptomTokens {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl SymptomTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token, returning `false` if it was already present.
    pub fn insert(&mut self, token: String) -> bool {
        if self.index.contains(&token) {
            return false;
        }
        self.index.insert(token.clone());
        self.ordered.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains(token)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl Extend<String> for SymptomTokens {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

impl FromIterator<String> for SymptomTokens {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tokens = Self::new();
        tokens.extend(iter);
        tokens
    }
}

impl<'a> FromIterator<&'a str> for SymptomTokens {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}
