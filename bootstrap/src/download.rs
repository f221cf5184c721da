//! Release download over HTTP.
//!
//! Provides a trait-based abstraction for fetching the release script so the
//! fetcher can be exercised without network access.

use std::sync::OnceLock;

/// Trait for downloading a release into memory.
///
/// # Examples
///
/// ```no_run
/// use waf_bootstrap::download::{ArtifactDownloader, HttpDownloader};
///
/// let bytes = HttpDownloader.fetch("http://waf.io/pub/release/waf-1.8.6")?;
/// assert!(!bytes.is_empty());
/// # Ok::<(), waf_bootstrap::download::DownloadError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactDownloader {
    /// Fetch the whole body at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be read.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Errors arising from download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested artefact was not found (HTTP 404).
    #[error("artefact not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error on the connection while sending or reading.
    #[error("I/O error reading download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl ArtifactDownloader for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        log::debug!("GET {url}");
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        // The whole body is kept, however large, so an oversized download
        // still reaches the digest check.
        let bytes = response
            .into_body()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| map_ureq_error(url, &e))?;
        log::debug!("received {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}

/// Shared `ureq` agent. Transfers run to completion: no timeout is set.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder().timeout_global(None).build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        ureq::Error::Io(source) => {
            DownloadError::Io(std::io::Error::new(source.kind(), source.to_string()))
        }
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
