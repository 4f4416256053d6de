//! Downloading the CSSE case files and cleaning them up again.

use covidtrend_common::{Case, Result, TrendError};
use covidtrend_config::SourceConfig;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::{Manifest, ManifestResource, MANIFEST_FILE};

/// HTTP fetcher for the three case files.
///
/// Downloads are sequential and never retried: the first failure aborts
/// [`Fetcher::update`] and files written before it are left in place.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: Url,
    data_dir: PathBuf,
    manifest_name: String,
    manifest_title: String,
}

impl Fetcher {
    /// Build a fetcher and its HTTP client from configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TrendError::config_with_source("Invalid base URL", e))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrendError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            data_dir: config.data_dir.clone(),
            manifest_name: config.manifest_name.clone(),
            manifest_title: config.manifest_title.clone(),
        })
    }

    /// Remote URL of a case file.
    pub fn url_for(&self, case: Case) -> Result<Url> {
        self.base_url
            .join(&case.file_name())
            .map_err(|e| TrendError::config_with_source("Cannot build resource URL", e))
    }

    /// Local path of a case file.
    pub fn path_for(&self, case: Case) -> PathBuf {
        self.data_dir.join(case.file_name())
    }

    /// Directory the files are written to.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Download every case file, overwrite local copies and write the manifest.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn update(&self) -> Result<Manifest> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let mut manifest = Manifest::new(&self.manifest_name, &self.manifest_title);
        for case in Case::ALL {
            let resource = self.download(case).await?;
            manifest.resources.push(resource);
        }

        manifest.fetched_at = chrono::Utc::now();
        let path = manifest.write(&self.data_dir)?;
        info!(
            path = %path.display(),
            resources = manifest.resources.len(),
            "wrote manifest"
        );
        Ok(manifest)
    }

    #[instrument(skip(self))]
    async fn download(&self, case: Case) -> Result<ManifestResource> {
        let url = self.url_for(case)?;
        debug!(%url, "downloading");

        let body = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = self.path_for(case);
        tokio::fs::write(&path, &body).await?;

        let rows = count_rows(&body);
        info!(
            name = %case.resource_name(),
            bytes = body.len(),
            rows,
            "downloaded resource"
        );

        Ok(ManifestResource {
            name: case.resource_name(),
            path: case.file_name(),
            url: url.to_string(),
            bytes: body.len() as u64,
            rows,
        })
    }

    /// Delete the local files. See [`cleanup_dir`].
    pub fn cleanup(&self) -> Result<usize> {
        cleanup_dir(&self.data_dir)
    }
}

/// Delete the three case files and the manifest from `dir`.
///
/// Missing files are skipped, so calling this twice is the same as calling
/// it once. Returns how many files were removed.
pub fn cleanup_dir(dir: &Path) -> Result<usize> {
    let targets = Case::ALL
        .iter()
        .map(|case| case.file_name())
        .chain(std::iter::once(MANIFEST_FILE.to_string()));

    let mut removed = 0;
    for name in targets {
        let path = dir.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed");
                removed += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    info!(dir = %dir.display(), removed, "cleaned data directory");
    Ok(removed)
}

/// Data rows in a CSV body, header excluded.
fn count_rows(body: &[u8]) -> usize {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body)
        .records()
        .filter(|r| r.is_ok())
        .count()
}
