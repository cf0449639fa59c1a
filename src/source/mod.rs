// file: src/source/mod.rs
// description: gazette retrieval and text extraction module exports
// reference: internal module structure

pub mod download;
pub mod locator;
pub mod pdf;

pub use download::{Downloader, FetchedGazette};
pub use locator::{
    FixedLocator, GazetteEdition, GazetteLocation, GazetteLocator, ResolvedGazette,
    SequentialProbeLocator,
};
pub use pdf::{AutoSource, DocumentSource, PdfTextSource, PlainTextSource};
