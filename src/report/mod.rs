// file: src/report/mod.rs
// description: report assembly module exports
// reference: internal module structure

pub mod builder;

pub use builder::{Report, ReportBuilder};
