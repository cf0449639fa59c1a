// file: src/pipeline/processor.rs
// description: segments a gazette's text and matches the configured terms against each unit
// reference: segmentation, normalization and matching wired together

use crate::config::SearchConfig;
use crate::error::Result;
use crate::extractor::TermMatcher;
use crate::models::{Digest, RawDocumentText, SearchTerm, SearchTermSet};
use crate::parser::{HeadingPatterns, Segmenter};
use tracing::{debug, info};

pub struct DocumentAnalyzer {
    segmenter: Segmenter,
    matcher: TermMatcher,
}

impl DocumentAnalyzer {
    pub fn new(segmenter: Segmenter, matcher: TermMatcher) -> Self {
        Self { segmenter, matcher }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let patterns = HeadingPatterns::from_config(config)?;
        let segmenter = Segmenter::new(patterns).with_fallback(config.fallback_whole_document);
        let matcher = TermMatcher::new(SearchTermSet::from_phrases(&config.terms));
        Ok(Self::new(segmenter, matcher))
    }

    pub fn terms(&self) -> &[SearchTerm] {
        self.matcher.terms()
    }

    pub fn analyze(&self, document: &RawDocumentText) -> Digest {
        info!("Analyzing {}", document.name());
        debug!(
            "{} lines, {} heading patterns, {} terms",
            document.line_count(),
            self.segmenter.patterns().len(),
            self.matcher.terms().len()
        );

        let digest = self
            .matcher
            .match_units(self.segmenter.segment(document.text()));

        info!(
            "Identified {} publications, {} with terms of interest",
            digest.units_scanned,
            digest.total_matches()
        );

        digest
    }
}
