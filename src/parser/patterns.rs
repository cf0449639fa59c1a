// file: src/parser/patterns.rs
// description: compiled heading patterns that open a publication unit
// reference: https://docs.rs/regex

use crate::config::{PatternSetName, SearchConfig};
use crate::error::{MonitorError, Result};
use crate::models::HeadingKind;
use lazy_static::lazy_static;
use regex::{Regex, RegexSet};

// Headings used by the TCE-CE electronic gazette.
const TCE_CE: &[(HeadingKind, &str)] = &[
    (
        HeadingKind::Separator,
        r"^\s*\*\s?\*\s?\*\s?\*\s?\*\s?\*\s?\*\s*$",
    ),
    (HeadingKind::ProcessNumber, r"^PROCESSO:\s*\d{5}/\d{4}-\d$"),
    (HeadingKind::NumberedProcess, r"^\d+\s+-\s+Processo\s+nº"),
    (HeadingKind::Judgment, r"^ACÓRDÃO\s+Nº\s+\d+/\d{4}$"),
    (HeadingKind::Judgment, r"^ACÓRDÃO\s+N\.º\s+\d+/\d{4}$"),
    (
        HeadingKind::ProcessualCommunication,
        r"^COMUNICAÇÃO\s+PROCESSUAL\s+DOE-TCE/CE\s+N°",
    ),
    (HeadingKind::PresidencyAct, r"^ATO\s+DA\s+PRESIDÊNCIA\s+Nº"),
    (HeadingKind::CircularLetter, r"^OFÍCIO CIRCULAR\s+Nº"),
    (HeadingKind::Act, r"^ATO\s+Nº"),
    (HeadingKind::Ordinance, r"^PORTARIA\s+Nº?"),
];

// Generic act-type headings found in state gazettes.
const ACT_TYPES: &[(HeadingKind, &str)] = &[
    (HeadingKind::Ordinance, r"^PORTARIA"),
    (HeadingKind::Act, r"^ATO"),
    (HeadingKind::Decree, r"^DECRETO"),
    (HeadingKind::Notice, r"^AVISO"),
    (HeadingKind::Extract, r"^EXTRATO DE"),
    (HeadingKind::Resolution, r"^RESOLUÇÃO"),
    (HeadingKind::NormativeInstruction, r"^INSTRUÇÃO NORMATIVA"),
];

lazy_static! {
    static ref TCE_CE_PATTERNS: HeadingPatterns =
        HeadingPatterns::compile(TCE_CE).expect("TCE_CE heading patterns are valid");

    static ref ACT_TYPE_PATTERNS: HeadingPatterns =
        HeadingPatterns::compile(ACT_TYPES).expect("ACT_TYPES heading patterns are valid");
}

/// One line-anchored heading matcher. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    kind: HeadingKind,
    source: String,
    regex: Regex,
}

impl HeadingPattern {
    pub fn new(kind: HeadingKind, source: &str) -> Result<Self> {
        let regex = Regex::new(&case_insensitive(source)).map_err(|e| MonitorError::Pattern {
            pattern: source.to_string(),
            source: e,
        })?;

        Ok(Self {
            kind,
            source: source.to_string(),
            regex,
        })
    }

    pub fn kind(&self) -> HeadingKind {
        self.kind
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line.trim())
    }
}

/// Ordered heading patterns evaluated together as one alternation.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    patterns: Vec<HeadingPattern>,
    set: RegexSet,
}

impl HeadingPatterns {
    pub fn new(patterns: Vec<HeadingPattern>) -> Result<Self> {
        let set = RegexSet::new(patterns.iter().map(|p| case_insensitive(&p.source)))
            .map_err(|e| MonitorError::Pattern {
                pattern: patterns
                    .iter()
                    .map(|p| p.source.as_str())
                    .collect::<Vec<_>>()
                    .join(" | "),
                source: e,
            })?;

        Ok(Self { patterns, set })
    }

    fn compile(table: &[(HeadingKind, &str)]) -> Result<Self> {
        let patterns = table
            .iter()
            .map(|(kind, source)| HeadingPattern::new(*kind, source))
            .collect::<Result<Vec<_>>>()?;
        Self::new(patterns)
    }

    pub fn tce_ce() -> Self {
        TCE_CE_PATTERNS.clone()
    }

    pub fn act_types() -> Self {
        ACT_TYPE_PATTERNS.clone()
    }

    pub fn named(name: PatternSetName) -> Self {
        match name {
            PatternSetName::TceCe => Self::tce_ce(),
            PatternSetName::ActTypes => Self::act_types(),
        }
    }

    /// Base set from `search.pattern_set` plus any `search.extra_patterns`.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let mut patterns = Self::named(config.pattern_set);
        for source in config.extra_patterns.iter().filter(|s| !s.trim().is_empty()) {
            patterns = patterns.with_pattern(HeadingPattern::new(HeadingKind::Custom, source)?)?;
        }
        Ok(patterns)
    }

    /// Appends a pattern; it is tried after the existing ones.
    pub fn with_pattern(self, pattern: HeadingPattern) -> Result<Self> {
        let mut patterns = self.patterns;
        patterns.push(pattern);
        Self::new(patterns)
    }

    /// Kind of the first pattern matching the trimmed line, if any.
    pub fn classify(&self, line: &str) -> Option<HeadingKind> {
        self.set
            .matches(line.trim())
            .iter()
            .next()
            .map(|index| self.patterns[index].kind)
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.set.is_match(line.trim())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn case_insensitive(source: &str) -> String {
    format!("(?i){source}")
}
