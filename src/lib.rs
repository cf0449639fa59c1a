// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod delivery;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod utils;

pub use config::{
    Config, MailConfig, PatternSetName, ReportConfig, ReportFormat, SearchConfig, SourceConfig,
};
pub use delivery::{DeliverySink, Envelope, LogSink, SmtpMailer};
pub use error::{MonitorError, Result};
pub use exporter::{DigestExporter, ExportedDigest};
pub use extractor::TermMatcher;
pub use models::{
    Digest, HeadingKind, MatchResult, PublicationUnit, RawDocumentText, SearchTerm, SearchTermSet,
    TermCount,
};
pub use parser::{HeadingPattern, HeadingPatterns, Segmenter, Segments, normalize};
pub use pipeline::{DocumentAnalyzer, MonitorPipeline, RunOutcome};
pub use report::{Report, ReportBuilder};
pub use source::{
    AutoSource, DocumentSource, Downloader, FixedLocator, GazetteLocator, PdfTextSource,
    PlainTextSource, ResolvedGazette, SequentialProbeLocator,
};
pub use utils::Validator;
