//! Error types for the waf bootstrap tool.
//!
//! A checksum mismatch is not an error: it is reported as an
//! [`Outcome`](crate::fetcher::Outcome) so the binary can give it its own
//! exit status. Everything here terminates the run with the generic failure
//! status.

use crate::download::DownloadError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort a bootstrap run.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Fetching the release archive failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The existing artefact could not report its version.
    #[error("failed to query version of {path}: {reason}")]
    VersionQuery {
        /// Path of the artefact that was invoked.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`BootstrapError`].
pub type Result<T> = std::result::Result<T, BootstrapError>;
