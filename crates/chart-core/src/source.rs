// File: crates/chart-core/src/source.rs
// Summary: Dataset sources: a local data directory or an HTTP base URL.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ChartError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Retrieves the raw text of a dataset by file name.
pub trait DataSource {
    fn fetch(&self, name: &str) -> Result<String>;
}

impl<S: DataSource + ?Sized> DataSource for &S {
    fn fetch(&self, name: &str) -> Result<String> {
        (**self).fetch(name)
    }
}

/// Reads datasets from files under a root directory.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirSource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        tracing::debug!(path = %path.display(), "reading dataset");
        std::fs::read_to_string(&path).map_err(|source| ChartError::Fetch { name: name.to_string(), source })
    }
}

/// Fetches datasets with a blocking GET of `<base_url>/<name>`.
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

/// True for `http://` and `https://` references.
pub fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

impl DataSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<String> {
        let url = self.url_for(name);
        let http_err = |reason: String| ChartError::Http { url: url.clone(), reason };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| http_err(format!("failed to create client: {e}")))?;

        tracing::debug!(url = %url, "fetching dataset");
        let response = client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                http_err("request timed out".to_string())
            } else if e.is_connect() {
                http_err("connection failed".to_string())
            } else {
                http_err(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_err(format!("HTTP {status}")));
        }
        response.text().map_err(|e| http_err(format!("failed to read body: {e}")))
    }
}

/// In-memory datasets keyed by file name; used by tests and embedders.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.push((name.into(), text.into()));
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| ChartError::Fetch {
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such dataset"),
            })
    }
}
