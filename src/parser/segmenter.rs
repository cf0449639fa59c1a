// file: src/parser/segmenter.rs
// description: splits gazette text into publication units at heading lines
// reference: line-oriented fold over the extracted text

use crate::models::{HeadingKind, PublicationUnit};
use crate::parser::patterns::HeadingPatterns;
use std::str::SplitInclusive;
use tracing::warn;

pub struct Segmenter {
    patterns: HeadingPatterns,
    fallback_whole_document: bool,
}

impl Segmenter {
    pub fn new(patterns: HeadingPatterns) -> Self {
        if patterns.is_empty() {
            warn!("Segmenter has no heading patterns; only the fallback unit can be produced");
        }
        Self {
            patterns,
            fallback_whole_document: false,
        }
    }

    /// When set, a non-blank document without any heading becomes one unit
    /// instead of producing none.
    pub fn with_fallback(mut self, fallback_whole_document: bool) -> Self {
        self.fallback_whole_document = fallback_whole_document;
        self
    }

    pub fn patterns(&self) -> &HeadingPatterns {
        &self.patterns
    }

    /// Lazily yields the units of `text` in document order. Calling it again restarts the scan.
    pub fn segment<'a>(&'a self, text: &'a str) -> Segments<'a> {
        Segments {
            patterns: &self.patterns,
            text,
            lines: text.split_inclusive('\n'),
            offset: 0,
            line_no: 0,
            pending: None,
            emitted: 0,
            fallback: self.fallback_whole_document,
            finished: false,
        }
    }

    /// Splits `text` into the unmatched leading prefix and the rest, which
    /// starts at the first heading line.
    pub fn split_prefix<'a>(&self, text: &'a str) -> (&'a str, &'a str) {
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if self.patterns.is_heading(line) {
                return text.split_at(offset);
            }
            offset += line.len();
        }
        (text, "")
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    start: usize,
    line: usize,
    kind: HeadingKind,
}

/// Iterator over the publication units of one text.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    patterns: &'a HeadingPatterns,
    text: &'a str,
    lines: SplitInclusive<'a, char>,
    offset: usize,
    line_no: usize,
    pending: Option<Pending>,
    emitted: usize,
    fallback: bool,
    finished: bool,
}

fn close<'a>(
    text: &'a str,
    emitted: &mut usize,
    pending: Pending,
    end: usize,
) -> PublicationUnit<'a> {
    let unit = PublicationUnit {
        ordinal: *emitted,
        kind: pending.kind,
        line: pending.line,
        text: &text[pending.start..end],
    };
    *emitted += 1;
    unit
}

impl<'a> Iterator for Segments<'a> {
    type Item = PublicationUnit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            let start = self.offset;
            self.offset += line.len();
            self.line_no += 1;

            let Some(kind) = self.patterns.classify(line) else {
                continue;
            };

            let next = Pending {
                start,
                line: self.line_no,
                kind,
            };
            if let Some(done) = self.pending.replace(next) {
                return Some(close(self.text, &mut self.emitted, done, start));
            }
        }

        self.finished = true;

        if let Some(done) = self.pending.take() {
            return Some(close(self.text, &mut self.emitted, done, self.text.len()));
        }

        if self.fallback && self.emitted == 0 && !self.text.trim().is_empty() {
            let whole = Pending {
                start: 0,
                line: 1,
                kind: HeadingKind::Untitled,
            };
            return Some(close(self.text, &mut self.emitted, whole, self.text.len()));
        }

        None
    }
}

impl std::iter::FusedIterator for Segments<'_> {}
