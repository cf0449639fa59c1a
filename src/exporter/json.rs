// file: src/exporter/json.rs
// description: json export of a digest for auditing past runs

use crate::error::{MonitorError, Result};
use crate::models::{Digest, RawDocumentText};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DigestExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportedDigest<'a> {
    pub run_id: Uuid,
    pub exported_at: String,
    pub document_name: &'a str,
    pub source_sha256: Option<&'a str>,
    #[serde(flatten)]
    pub digest: &'a Digest,
}

impl DigestExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| MonitorError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir, pretty })
    }

    /// Writes `<document stem>.digest.json` and returns its path.
    pub fn export(&self, document: &RawDocumentText, digest: &Digest) -> Result<PathBuf> {
        let record = ExportedDigest {
            run_id: Uuid::new_v4(),
            exported_at: Utc::now().to_rfc3339(),
            document_name: document.name(),
            source_sha256: document.source_hash(),
            digest,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };

        let stem = document
            .name()
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(document.name());
        let path = self.output_dir.join(format!("{stem}.digest.json"));
        fs::write(&path, json).map_err(|source| MonitorError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!(
            "Exported digest with {} match(es) to {}",
            digest.total_matches(),
            path.display()
        );
        Ok(path)
    }
}
