//! Batch manifest written next to the downloaded files.

use chrono::{DateTime, Utc};
use covidtrend_common::{Case, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the manifest inside the data directory.
pub const MANIFEST_FILE: &str = "datapackage.json";

/// One downloaded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestResource {
    /// File stem, e.g. `time_series_19-covid-Confirmed`
    pub name: String,
    /// File name relative to the data directory
    pub path: String,
    /// Source URL
    pub url: String,
    /// Size of the body in bytes
    pub bytes: u64,
    /// Data rows, excluding the header
    pub rows: usize,
}

/// Describes one fetched batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package name
    pub name: String,
    /// Package title
    pub title: String,
    /// When the batch finished downloading
    pub fetched_at: DateTime<Utc>,
    /// Resources in download order
    pub resources: Vec<ManifestResource>,
}

impl Manifest {
    /// Empty manifest stamped with the current time.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            fetched_at: Utc::now(),
            resources: Vec::new(),
        }
    }

    /// Resource entry for `case`, if it was fetched.
    pub fn resource(&self, case: Case) -> Option<&ManifestResource> {
        let name = case.resource_name();
        self.resources.iter().find(|r| r.name == name)
    }

    /// Manifest path inside `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Write pretty-printed JSON into `dir`, replacing any previous manifest.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(dir);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Read the manifest from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(Self::path_in(dir))?;
        Ok(serde_json::from_str(&content)?)
    }
}
