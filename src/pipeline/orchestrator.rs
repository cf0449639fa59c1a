// file: src/pipeline/orchestrator.rs
// description: one monitoring run from locating the gazette to delivering the digest
// reference: sequential collaborator calls around the pure analysis core

use crate::delivery::{DeliverySink, Envelope};
use crate::error::{MonitorError, Result};
use crate::exporter::DigestExporter;
use crate::models::Digest;
use crate::pipeline::processor::DocumentAnalyzer;
use crate::report::{Report, ReportBuilder};
use crate::source::{DocumentSource, Downloader, GazetteLocator};
use std::sync::Arc;
use tracing::{error, info, warn};

/// What happened during a run that reached the analysis stage.
#[derive(Debug)]
pub struct RunOutcome {
    pub document_name: String,
    pub digest: Digest,
    pub report: Report,
    pub delivered: bool,
}

pub struct MonitorPipeline<L, S, D> {
    locator: L,
    downloader: Downloader,
    source: S,
    analyzer: DocumentAnalyzer,
    reporter: ReportBuilder,
    sink: Arc<D>,
    recipients: Vec<String>,
    keep_download: bool,
    exporter: Option<DigestExporter>,
}

impl<L, S, D> MonitorPipeline<L, S, D>
where
    L: GazetteLocator,
    S: DocumentSource,
    D: DeliverySink + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        locator: L,
        downloader: Downloader,
        source: S,
        analyzer: DocumentAnalyzer,
        reporter: ReportBuilder,
        sink: D,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            locator,
            downloader,
            source,
            analyzer,
            reporter,
            sink: Arc::new(sink),
            recipients,
            keep_download: false,
            exporter: None,
        }
    }

    pub fn keep_download(mut self, keep: bool) -> Self {
        self.keep_download = keep;
        self
    }

    pub fn with_exporter(mut self, exporter: Option<DigestExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    /// `Ok(None)` when no gazette could be located. Extraction failures abort
    /// the run before any report is built; delivery failures do not.
    pub async fn run(&self) -> Result<Option<RunOutcome>> {
        let Some(gazette) = self.locator.locate().await? else {
            warn!("No gazette edition could be located");
            return Ok(None);
        };

        let fetched = self.downloader.fetch(&gazette).await?;
        let outcome = self.process(&fetched.name, &fetched.bytes).await;

        if !self.keep_download
            && let Err(e) = fetched.cleanup()
        {
            warn!("Failed to remove {}: {}", fetched.path.display(), e);
        }

        outcome.map(Some)
    }

    async fn process(&self, name: &str, bytes: &[u8]) -> Result<RunOutcome> {
        let digest = {
            let document = self.source.extract(name, bytes)?;
            let digest = self.analyzer.analyze(&document);

            if let Some(exporter) = &self.exporter
                && let Err(e) = exporter.export(&document, &digest)
            {
                warn!("Digest export failed: {}", e);
            }
            digest
        };

        let report = self.reporter.build(name, &digest, self.analyzer.terms());
        let envelope = Envelope {
            subject: report.subject.clone(),
            body: report.body.clone(),
            format: report.format,
            recipients: self.recipients.clone(),
            attachment: bytes.to_vec(),
            attachment_name: name.to_string(),
        };

        let delivered = match self.deliver(envelope).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to deliver report for {}: {}", name, e);
                false
            }
        };

        info!(
            "Run finished for {}: {} matching publication(s), delivered: {}",
            name,
            digest.total_matches(),
            delivered
        );

        Ok(RunOutcome {
            document_name: name.to_string(),
            digest,
            report,
            delivered,
        })
    }

    /// Single attempt on the blocking pool; SMTP transports block on network I/O.
    async fn deliver(&self, envelope: Envelope) -> Result<()> {
        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.deliver(&envelope))
            .await
            .map_err(|e| MonitorError::Delivery(format!("delivery task failed: {}", e)))?
    }
}
