//! Cached download of product images (blocking reqwest, no Tokio runtime).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use url::Url;

/// Subdirectory of the destination folder that holds fetched images.
pub const IMAGES_DIR_NAME: &str = "Images";

/// Hard timeout for a single image download.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("catref/", env!("CARGO_PKG_VERSION"));

/// What happened to one product's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was already on disk; no network activity.
    Cached,
    /// Fetched from the partner CDN and written to the cache.
    Downloaded,
    /// The product has no usable photo URL.
    NoMedia,
    /// The CDN answered 404.
    NotFound,
    /// Any other failure: bad URL, network error, non-2xx status, disk error.
    Failed(String),
}

/// Downloads product images into `<dest>/Images/<internal code>.png`.
pub struct ImageStore {
    http: reqwest::blocking::Client,
    images_dir: PathBuf,
}

impl ImageStore {
    pub fn new(dest_dir: &Path) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            images_dir: dest_dir.join(IMAGES_DIR_NAME),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Cache path for a product. The extension is always `.png` regardless
    /// of what the URL claims.
    pub fn image_path(&self, internal_code: &str) -> PathBuf {
        self.images_dir.join(format!("{internal_code}.png"))
    }

    /// Make sure the product's image is on disk.
    ///
    /// The cache check comes first: an existing file wins even when the
    /// catalog no longer carries a URL for the product. Failures are
    /// reported, not propagated, so one dead link never aborts a run.
    pub fn ensure(&self, internal_code: &str, url: Option<&str>) -> FetchOutcome {
        let path = self.image_path(internal_code);
        if path.exists() {
            return FetchOutcome::Cached;
        }

        let raw_url = match url {
            Some(u) if !u.trim().is_empty() => u,
            _ => return FetchOutcome::NoMedia,
        };

        let parsed = match Url::parse(raw_url) {
            Ok(parsed) => parsed,
            Err(e) => return FetchOutcome::Failed(format!("invalid URL '{raw_url}': {e}")),
        };

        let response = match self.http.get(parsed).send() {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }
        if !status.is_success() {
            return FetchOutcome::Failed(format!("HTTP {}", status.as_u16()));
        }

        let bytes = match response.bytes() {
            Ok(bytes) => bytes,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };

        match self.write_atomic(&path, &bytes) {
            Ok(()) => FetchOutcome::Downloaded,
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Write via a sibling temp file so a crash mid-download never leaves a
    /// truncated file that a later run would treat as cached.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), String> {
        fs::create_dir_all(&self.images_dir)
            .map_err(|e| format!("cannot create {}: {e}", self.images_dir.display()))?;

        let mut temp = NamedTempFile::new_in(&self.images_dir)
            .map_err(|e| format!("cannot create temp file: {e}"))?;
        temp.write_all(bytes)
            .map_err(|e| format!("cannot write image: {e}"))?;
        temp.persist(path)
            .map_err(|e| format!("cannot persist {}: {e}", path.display()))?;
        Ok(())
    }
}
