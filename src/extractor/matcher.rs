// file: src/extractor/matcher.rs
// description: accent-insensitive term search over publication units with per-term counts
// reference: substring matching on normalized text

use crate::models::{Digest, MatchResult, PublicationUnit, SearchTerm, SearchTermSet, TermCount};
use crate::parser::normalizer::normalize;
use tracing::debug;

pub struct TermMatcher {
    terms: SearchTermSet,
}

impl TermMatcher {
    pub fn new(terms: SearchTermSet) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[SearchTerm] {
        self.terms.as_slice()
    }

    /// Terms found in `unit`, in configuration order, or `None` when nothing matched.
    pub fn match_unit(&self, unit: &PublicationUnit<'_>) -> Option<MatchResult> {
        if self.terms.is_empty() {
            return None;
        }

        let normalized = normalize(unit.text);
        let terms: Vec<SearchTerm> = self
            .terms
            .iter()
            .filter(|term| term.occurs_in(&normalized))
            .cloned()
            .collect();

        if terms.is_empty() {
            return None;
        }

        Some(MatchResult {
            ordinal: unit.ordinal,
            kind: unit.kind,
            line: unit.line,
            text: unit.trimmed().to_string(),
            terms,
        })
    }

    /// Matches every unit and aggregates how many units each term appeared in.
    pub fn match_units<'a, I>(&self, units: I) -> Digest
    where
        I: IntoIterator<Item = PublicationUnit<'a>>,
    {
        let mut digest = Digest::empty(self.terms.as_slice());

        for unit in units {
            digest.units_scanned += 1;

            if let Some(result) = self.match_unit(&unit) {
                debug!(
                    "Unit {} (line {}, '{}') matched {} term(s)",
                    result.ordinal,
                    result.line,
                    unit.heading(),
                    result.terms.len()
                );
                for term in &result.terms {
                    increment(&mut digest.counts, term);
                }
                digest.results.push(result);
            }
        }

        digest
    }
}

fn increment(counts: &mut [TermCount], term: &SearchTerm) {
    if let Some(entry) = counts.iter_mut().find(|c| c.term == *term) {
        entry.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeadingKind;
    use crate::parser::{HeadingPatterns, Segmenter};
    use pretty_assertions::assert_eq;

    fn unit(ordinal: usize, text: &str) -> PublicationUnit<'_> {
        PublicationUnit {
            ordinal,
            kind: HeadingKind::Ordinance,
            line: ordinal + 1,
            text,
        }
    }

    fn matcher(phrases: &[&str]) -> TermMatcher {
        TermMatcher::new(SearchTermSet::from_phrases(phrases))
    }

    #[test]
    fn test_accented_unit_matches_plain_term() {
        let matcher = matcher(&["secretaria de educacao"]);
        let result = matcher
            .match_unit(&unit(0, "...Secretaria de Educação do Estado..."))
            .unwrap();

        assert_eq!(result.term_names(), vec!["secretaria de educacao"]);
    }

    #[test]
    fn test_two_terms_in_one_unit() {
        let matcher = matcher(&["Instituto Dr. José Frota", "Secretaria de Educação"]);
        let units = vec![
            unit(0, "PORTARIA Nº 1\nSECRETARIA DE EDUCAÇÃO e INSTITUTO DR. JOSE FROTA\n"),
            unit(1, "PORTARIA Nº 2\nnada relevante\n"),
        ];

        let digest = matcher.match_units(units);
        assert_eq!(digest.units_scanned, 2);
        assert_eq!(digest.results.len(), 1);
        assert_eq!(
            digest.results[0].term_names(),
            vec!["Instituto Dr. José Frota", "Secretaria de Educação"]
        );
        assert!(matcher.terms().iter().all(|t| digest.count_for(t) == 1));
    }

    #[test]
    fn test_terms_follow_input_order_not_discovery_order() {
        let matcher = matcher(&["zeta", "alfa"]);
        let result = matcher.match_unit(&unit(0, "alfa antes de zeta")).unwrap();

        assert_eq!(result.term_names(), vec!["zeta", "alfa"]);
    }

    #[test]
    fn test_result_text_is_trimmed() {
        let matcher = matcher(&["juventude"]);
        let result = matcher
            .match_unit(&unit(3, "\n  ATO Nº 9\nSecretaria da Juventude\n\n"))
            .unwrap();

        assert_eq!(result.text, "ATO Nº 9\nSecretaria da Juventude");
        assert_eq!(result.ordinal, 3);
    }

    #[test]
    fn test_empty_term_set() {
        let matcher = matcher(&[]);
        let digest = matcher.match_units(vec![unit(0, "PORTARIA Nº 1\nqualquer coisa")]);

        assert!(digest.results.is_empty());
        assert!(digest.counts.is_empty());
        assert_eq!(digest.units_scanned, 1);
    }

    #[test]
    fn test_empty_normalized_term_never_matches() {
        let matcher = matcher(&["\u{0301}\u{0327}", "frota"]);
        let digest = matcher.match_units(vec![unit(0, "Texto qualquer"), unit(1, "")]);

        assert!(digest.results.is_empty());
        assert_eq!(digest.counts.len(), 2);
        assert!(digest.counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_counts_equal_sum_over_results() {
        let matcher = matcher(&["educação", "juventude", "frota"]);
        let units = vec![
            unit(0, "Educação"),
            unit(1, "Juventude e Educacao"),
            unit(2, "sem termos"),
            unit(3, "EDUCAÇÃO"),
        ];

        let digest = matcher.match_units(units);
        assert_eq!(
            digest.results.iter().map(|r| r.ordinal).collect::<Vec<_>>(),
            vec![0, 1, 3]
        );

        for term in matcher.terms() {
            let summed = digest
                .results
                .iter()
                .filter(|r| r.terms.contains(term))
                .count();
            assert_eq!(digest.count_for(term), summed);
        }
        assert_eq!(digest.count_for(&SearchTerm::new("frota")), 0);
    }

    #[test]
    fn test_empty_document_yields_empty_digest() {
        let segmenter = Segmenter::new(HeadingPatterns::tce_ce());
        let matcher = matcher(&["educação", "juventude"]);
        let digest = matcher.match_units(segmenter.segment(""));

        assert_eq!(digest.units_scanned, 0);
        assert!(!digest.has_matches());
        assert_eq!(
            digest.counts.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![0, 0]
        );
    }
}
