// file: src/models/publication.rs
// description: publication units carved out of a gazette's text
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Which heading convention opened a publication unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingKind {
    Separator,
    ProcessNumber,
    NumberedProcess,
    Judgment,
    ProcessualCommunication,
    PresidencyAct,
    CircularLetter,
    Act,
    Ordinance,
    Decree,
    Notice,
    Extract,
    Resolution,
    NormativeInstruction,
    Custom,
    /// Whole document kept as a single unit because no heading was found.
    Untitled,
}

impl HeadingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingKind::Separator => "separator",
            HeadingKind::ProcessNumber => "process_number",
            HeadingKind::NumberedProcess => "numbered_process",
            HeadingKind::Judgment => "judgment",
            HeadingKind::ProcessualCommunication => "processual_communication",
            HeadingKind::PresidencyAct => "presidency_act",
            HeadingKind::CircularLetter => "circular_letter",
            HeadingKind::Act => "act",
            HeadingKind::Ordinance => "ordinance",
            HeadingKind::Decree => "decree",
            HeadingKind::Notice => "notice",
            HeadingKind::Extract => "extract",
            HeadingKind::Resolution => "resolution",
            HeadingKind::NormativeInstruction => "normative_instruction",
            HeadingKind::Custom => "custom",
            HeadingKind::Untitled => "untitled",
        }
    }
}

/// A contiguous span of the source text, borrowed as-is (untrimmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationUnit<'a> {
    /// 0-based position among the units of the document.
    pub ordinal: usize,
    pub kind: HeadingKind,
    /// 1-based line on which the unit starts.
    pub line: usize,
    pub text: &'a str,
}

impl<'a> PublicationUnit<'a> {
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn heading(&self) -> &'a str {
        self.text.lines().next().unwrap_or_default().trim()
    }
}
