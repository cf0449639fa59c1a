// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod processor;

pub use orchestrator::{MonitorPipeline, RunOutcome};
pub use processor::DocumentAnalyzer;
