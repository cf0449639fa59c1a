// file: src/models/digest.rs
// description: match results and per-term counts for one gazette edition
// reference: internal data structures

use crate::models::{HeadingKind, SearchTerm};
use serde::{Deserialize, Serialize};

/// A publication unit in which at least one term was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub ordinal: usize,
    pub kind: HeadingKind,
    pub line: usize,
    /// Unit text with surrounding whitespace removed.
    pub text: String,
    /// Matched terms in configuration order.
    pub terms: Vec<SearchTerm>,
}

impl MatchResult {
    pub fn term_names(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.original.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: SearchTerm,
    /// Number of units in which the term appears.
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub units_scanned: usize,
    pub results: Vec<MatchResult>,
    /// One entry per configured term, zero counts included.
    pub counts: Vec<TermCount>,
}

impl Digest {
    /// Digest with no matches and a zero count for every term.
    pub fn empty(terms: &[SearchTerm]) -> Self {
        Self {
            units_scanned: 0,
            results: Vec::new(),
            counts: terms
                .iter()
                .map(|term| TermCount {
                    term: term.clone(),
                    count: 0,
                })
                .collect(),
        }
    }

    pub fn total_matches(&self) -> usize {
        self.results.len()
    }

    pub fn has_matches(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn count_for(&self, term: &SearchTerm) -> usize {
        self.counts
            .iter()
            .find(|c| c.term.normalized == term.normalized)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}
