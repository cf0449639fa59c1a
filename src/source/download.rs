// file: src/source/download.rs
// description: fetches the resolved gazette into the download directory
// reference: https://docs.rs/reqwest

use crate::error::{MonitorError, Result};
use crate::source::locator::{GazetteLocation, ResolvedGazette};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Gazette bytes plus where they live on disk.
#[derive(Debug)]
pub struct FetchedGazette {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    /// Only files this process downloaded are ever removed.
    downloaded: bool,
}

impl FetchedGazette {
    pub fn is_downloaded(&self) -> bool {
        self.downloaded
    }

    /// Removes the downloaded file; local inputs are left alone.
    pub fn cleanup(&self) -> Result<()> {
        if !self.downloaded {
            return Ok(());
        }

        info!("Removing temporary file: {}", self.path.display());
        fs::remove_file(&self.path).map_err(|source| MonitorError::FileOperation {
            path: self.path.clone(),
            source,
        })
    }
}

pub struct Downloader {
    client: Client,
    download_dir: PathBuf,
}

impl Downloader {
    pub fn new(download_dir: impl Into<PathBuf>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MonitorError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            download_dir: download_dir.into(),
        })
    }

    pub async fn fetch(&self, gazette: &ResolvedGazette) -> Result<FetchedGazette> {
        match &gazette.location {
            GazetteLocation::Local(path) => read_local(&gazette.name, path),
            GazetteLocation::Remote(url) => self.download(&gazette.name, url).await,
        }
    }

    async fn download(&self, name: &str, url: &str) -> Result<FetchedGazette> {
        info!("Downloading {}", name);

        let download_error = |message: String| MonitorError::Download {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| download_error(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?
            .to_vec();

        if bytes.is_empty() {
            warn!("Server returned an empty body for {}", name);
            return Err(download_error("empty response body".to_string()));
        }

        fs::create_dir_all(&self.download_dir).map_err(|source| MonitorError::FileOperation {
            path: self.download_dir.clone(),
            source,
        })?;
        let path = self.download_dir.join(name);
        fs::write(&path, &bytes).map_err(|source| MonitorError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Saved {} bytes to {}", bytes.len(), path.display());

        Ok(FetchedGazette {
            name: name.to_string(),
            path,
            bytes,
            downloaded: true,
        })
    }
}

fn read_local(name: &str, path: &Path) -> Result<FetchedGazette> {
    let bytes = fs::read(path).map_err(|source| MonitorError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(FetchedGazette {
        name: name.to_string(),
        path: path.to_path_buf(),
        bytes,
        downloaded: false,
    })
}
