// file: src/models/search_term.rs
// description: search terms with their normalized matching form
// reference: internal data structures

use crate::parser::normalizer::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchTerm {
    /// Phrase as configured, used in reports.
    pub original: String,
    pub normalized: String,
}

impl SearchTerm {
    pub fn new(phrase: &str) -> Self {
        let original = phrase.trim().to_string();
        let normalized = normalize(&original);
        Self {
            original,
            normalized,
        }
    }

    /// A term whose normalized form is empty would match everything, so it matches nothing.
    pub fn is_matchable(&self) -> bool {
        !self.normalized.is_empty()
    }

    pub fn occurs_in(&self, normalized_text: &str) -> bool {
        self.is_matchable() && normalized_text.contains(&self.normalized)
    }
}

/// Ordered, duplicate-free list of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTermSet {
    terms: Vec<SearchTerm>,
}

impl SearchTermSet {
    /// Trims each phrase, drops empty ones and keeps the first of any phrases
    /// that normalize to the same text.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = phrases
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| SearchTerm::new(p.as_ref()))
            .filter(|t| seen.insert(t.normalized.clone()))
            .collect();

        Self { terms }
    }

    pub fn as_slice(&self) -> &[SearchTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<'a> IntoIterator for &'a SearchTermSet {
    type Item = &'a SearchTerm;
    type IntoIter = std::slice::Iter<'a, SearchTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
