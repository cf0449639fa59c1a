// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod digest;
pub mod document;
pub mod publication;
pub mod search_term;

pub use digest::{Digest, MatchResult, TermCount};
pub use document::RawDocumentText;
pub use publication::{HeadingKind, PublicationUnit};
pub use search_term::{SearchTerm, SearchTermSet};
