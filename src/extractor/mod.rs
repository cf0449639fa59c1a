// file: src/extractor/mod.rs
// description: term matching module exports
// reference: internal module structure

pub mod matcher;

pub use matcher::TermMatcher;
