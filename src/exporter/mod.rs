// file: src/exporter/mod.rs
// description: digest export module exports
// reference: internal module structure

pub mod json;

pub use json::{DigestExporter, ExportedDigest};
