// file: src/source/locator.rs
// description: strategies that resolve the latest gazette edition
// reference: https://docs.rs/reqwest

use crate::config::SourceConfig;
use crate::error::{MonitorError, Result};
use chrono::{Datelike, Local};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteLocation {
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGazette {
    /// File name used in reports and for the attachment.
    pub name: String,
    pub location: GazetteLocation,
}

pub trait GazetteLocator {
    /// `Ok(None)` means no edition is currently available.
    fn locate(&self) -> impl Future<Output = Result<Option<ResolvedGazette>>> + Send;
}

/// Always resolves to the location it was built with.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    gazette: ResolvedGazette,
}

impl FixedLocator {
    pub fn remote(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            gazette: ResolvedGazette {
                name: name.into(),
                location: GazetteLocation::Remote(url.into()),
            },
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            gazette: ResolvedGazette {
                name,
                location: GazetteLocation::Local(path),
            },
        }
    }
}

impl GazetteLocator for FixedLocator {
    async fn locate(&self) -> Result<Option<ResolvedGazette>> {
        Ok(Some(self.gazette.clone()))
    }
}

/// One numbered edition, e.g. `DOTCECE_12-140.pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteEdition {
    pub year_code: i32,
    pub number: u32,
}

impl GazetteEdition {
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}_{}-{}.pdf", prefix, self.year_code, self.number)
    }

    /// The file path goes in the `url` query parameter with its slashes percent-encoded.
    pub fn url(&self, base_url: &str, prefix: &str) -> String {
        format!(
            "{}?url=%2F{}%2F{}",
            base_url.trim_end_matches('/'),
            self.year_code,
            self.file_name(prefix)
        )
    }

    pub fn resolve(&self, config: &SourceConfig) -> ResolvedGazette {
        ResolvedGazette {
            name: self.file_name(&config.file_prefix),
            location: GazetteLocation::Remote(self.url(&config.base_url, &config.file_prefix)),
        }
    }
}

pub fn year_code(year: i32, offset: i32) -> i32 {
    year - offset
}

/// Probes `start, start + 1, ...` and returns the last number that exists.
///
/// Stops at the first miss or after `max_attempts` probes. `None` when the
/// very first probe misses.
pub async fn probe_sequence<F, Fut>(
    start: u32,
    max_attempts: u32,
    mut probe: F,
) -> Result<Option<u32>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let mut last_found = None;

    for number in (start..).take(max_attempts as usize) {
        if probe(number).await? {
            last_found = Some(number);
        } else {
            debug!("Edition {} not available, stopping", number);
            break;
        }
    }

    Ok(last_found)
}

/// Walks the numbered edition sequence with HEAD requests until a miss.
pub struct SequentialProbeLocator {
    client: Client,
    config: SourceConfig,
    year_code: i32,
    show_progress: bool,
}

impl SequentialProbeLocator {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout_secs))
            .build()
            .map_err(|e| MonitorError::Network(format!("Failed to build HTTP client: {}", e)))?;
        let year_code = year_code(Local::now().year(), config.year_offset);

        Ok(Self {
            client,
            config,
            year_code,
            show_progress: false,
        })
    }

    pub fn with_year_code(mut self, year_code: i32) -> Self {
        self.year_code = year_code;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn edition(&self, number: u32) -> GazetteEdition {
        GazetteEdition {
            year_code: self.year_code,
            number,
        }
    }

    async fn exists(&self, number: u32, spinner: &ProgressBar) -> Result<bool> {
        let edition = self.edition(number);
        let url = edition.url(&self.config.base_url, &self.config.file_prefix);
        spinner.set_message(format!("Probing {}", edition.file_name(&self.config.file_prefix)));

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| MonitorError::Network(format!("HEAD {} failed: {}", url, e)))?;

        debug!("HEAD {} -> {}", url, response.status());
        Ok(response.status() == StatusCode::OK)
    }
}

impl GazetteLocator for SequentialProbeLocator {
    async fn locate(&self) -> Result<Option<ResolvedGazette>> {
        info!(
            "Searching for the latest gazette from number {} (year code {})",
            self.config.start_number, self.year_code
        );

        let spinner = if self.show_progress {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        } else {
            ProgressBar::hidden()
        };

        let found = probe_sequence(self.config.start_number, self.config.max_attempts, |n| {
            self.exists(n, &spinner)
        })
        .await;
        spinner.finish_and_clear();

        let gazette = found?.map(|number| self.edition(number).resolve(&self.config));
        match &gazette {
            Some(g) => info!("Latest gazette: {}", g.name),
            None => info!("No gazette available from number {}", self.config.start_number),
        }

        Ok(gazette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[test]
    fn test_edition_url() {
        let edition = GazetteEdition {
            year_code: 12,
            number: 140,
        };

        assert_eq!(edition.file_name("DOTCECE"), "DOTCECE_12-140.pdf");
        assert_eq!(
            edition.url("https://contexto-api.tce.ce.gov.br/arquivos/doe/", "DOTCECE"),
            "https://contexto-api.tce.ce.gov.br/arquivos/doe?url=%2F12%2FDOTCECE_12-140.pdf"
        );
    }

    #[test]
    fn test_year_code() {
        assert_eq!(year_code(2025, 2013), 12);
    }

    #[test]
    fn test_probe_stops_at_first_miss() {
        let probed = RefCell::new(Vec::new());
        let found = tokio_test::block_on(probe_sequence(112, 500, |n| {
            probed.borrow_mut().push(n);
            async move { Ok(n < 115) }
        }))
        .unwrap();

        assert_eq!(found, Some(114));
        assert_eq!(probed.into_inner(), vec![112, 113, 114, 115]);
    }

    #[test]
    fn test_probe_first_miss_means_nothing_found() {
        let found =
            tokio_test::block_on(probe_sequence(112, 500, |_| async { Ok(false) })).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_probe_is_bounded() {
        let calls = RefCell::new(0);
        let found = tokio_test::block_on(probe_sequence(1, 3, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(true) }
        }))
        .unwrap();

        assert_eq!(found, Some(3));
        assert_eq!(calls.into_inner(), 3);
    }

    #[test]
    fn test_probe_propagates_errors() {
        let result = tokio_test::block_on(probe_sequence(1, 10, |n| async move {
            if n == 2 {
                Err(MonitorError::Network("connection reset".to_string()))
            } else {
                Ok(true)
            }
        }));

        assert!(matches!(result, Err(MonitorError::Network(_))));
    }

    #[test]
    fn test_fixed_locator() {
        let locator = FixedLocator::local("/tmp/DOTCECE_12-7.pdf");
        let gazette = tokio_test::block_on(locator.locate()).unwrap().unwrap();

        assert_eq!(gazette.name, "DOTCECE_12-7.pdf");
        assert_eq!(
            gazette.location,
            GazetteLocation::Local(PathBuf::from("/tmp/DOTCECE_12-7.pdf"))
        );
    }

    #[test]
    fn test_resolve_from_config() {
        let config = Config::default_config();
        let gazette = GazetteEdition {
            year_code: 12,
            number: 5,
        }
        .resolve(&config.source);

        assert_eq!(gazette.name, "DOTCECE_12-5.pdf");
        assert!(matches!(
            gazette.location,
            GazetteLocation::Remote(ref url) if url.ends_with("%2F12%2FDOTCECE_12-5.pdf")
        ));
    }
}
