//! Ensure a verified copy of the pinned release exists on disk.
//!
//! The flow is linear: look for an existing artefact reporting the expected
//! version; otherwise download the release, check its SHA-256 digest against
//! the compiled-in one and, only on a match, write it out with the owner
//! execute bit added.
//!
//! A version-matched artefact is trusted without hashing unless
//! [`FetchConfig::verify_existing`] is set.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

use crate::download::{ArtifactDownloader, HttpDownloader};
use crate::error::Result;
use crate::install::install_artifact;
use crate::output::{
    CHECKSUM_VERIFIED, checksum_mismatch_lines, downloading_message, skip_message,
    stale_artifact_message, write_line,
};
use crate::release::Release;
use crate::sha256_digest::Sha256Digest;
use crate::version::{CommandExecutor, SystemCommandExecutor, query_version};

/// Settings for one bootstrap run.
///
/// The default reproduces the compiled-in behaviour: the pinned release,
/// stored in the current directory, with progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// The release to fetch.
    pub release: Release,
    /// Directory holding the artefact.
    pub dir: Utf8PathBuf,
    /// When true, suppress progress output. Mismatch diagnostics are always
    /// shown.
    pub quiet: bool,
    /// When true, hash a version-matched artefact before trusting it.
    pub verify_existing: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            release: Release::pinned(),
            dir: Utf8PathBuf::from("."),
            quiet: false,
            verify_existing: false,
        }
    }
}

impl FetchConfig {
    /// Path of the local artefact.
    ///
    /// Always carries a directory component so invoking it never goes through
    /// a `PATH` lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use waf_bootstrap::fetcher::FetchConfig;
    ///
    /// assert_eq!(FetchConfig::default().artifact_path(), "./waf");
    /// ```
    #[must_use]
    pub fn artifact_path(&self) -> Utf8PathBuf {
        let dir = if self.dir.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            self.dir.as_path()
        };
        dir.join(self.release.artifact_name())
    }
}

/// How a run ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An artefact reporting the expected version was already present.
    AlreadySatisfied,
    /// The release was downloaded, verified and written.
    Installed {
        /// Where the artefact was written.
        path: Utf8PathBuf,
    },
    /// The downloaded bytes did not hash to the expected digest. Nothing was
    /// written.
    ChecksumMismatch {
        /// Digest of the downloaded bytes.
        actual: Sha256Digest,
        /// Digest the release is pinned to.
        expected: Sha256Digest,
    },
}

impl Outcome {
    /// Process exit status for this outcome: 1 for an integrity failure,
    /// 0 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AlreadySatisfied | Self::Installed { .. } => 0,
            Self::ChecksumMismatch { .. } => 1,
        }
    }
}

/// Ensure the artefact using the real network and process executor.
///
/// # Errors
///
/// Returns an error when the version query, the download or the write fails.
pub fn ensure_artifact(config: &FetchConfig, out: &mut dyn Write) -> Result<Outcome> {
    ensure_artifact_with(config, &HttpDownloader, &SystemCommandExecutor, out)
}

/// Testable inner function with injected dependencies.
///
/// # Errors
///
/// Returns an error when the version query, the download or the write fails.
pub fn ensure_artifact_with(
    config: &FetchConfig,
    downloader: &dyn ArtifactDownloader,
    executor: &dyn CommandExecutor,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let path = config.artifact_path();
    let release = &config.release;

    // Step 1: Trust an existing artefact that reports the expected version.
    if existing_matches(config, &path, executor, out)? {
        if !config.quiet {
            write_line(out, skip_message(release.artifact_name()));
        }
        return Ok(Outcome::AlreadySatisfied);
    }

    // Step 2: Download.
    if !config.quiet {
        write_line(out, downloading_message(release.url()));
    }
    let bytes = downloader.fetch(release.url())?;

    // Step 3: Verify.
    let actual = Sha256Digest::of(&bytes);
    if actual != *release.sha256() {
        log::warn!(
            "digest mismatch for {}: got {actual}, expected {}",
            release.url(),
            release.sha256()
        );
        for line in checksum_mismatch_lines(&actual, release.sha256()) {
            write_line(out, line);
        }
        return Ok(Outcome::ChecksumMismatch {
            actual,
            expected: release.sha256().clone(),
        });
    }

    // Step 4: Persist.
    install_artifact(&path, &bytes)?;
    log::info!("installed {} ({} bytes) at {path}", release.tag(), bytes.len());
    if !config.quiet {
        write_line(out, CHECKSUM_VERIFIED);
    }
    Ok(Outcome::Installed { path })
}

/// Whether an artefact at `path` can stand in for a download.
fn existing_matches(
    config: &FetchConfig,
    path: &Utf8Path,
    executor: &dyn CommandExecutor,
    out: &mut dyn Write,
) -> Result<bool> {
    if !path.exists() {
        log::debug!("{path} not present");
        return Ok(false);
    }

    let found = query_version(executor, path)?;
    let wanted = config.release.version();
    if found != wanted {
        log::info!("{path} reports version {found}, want {wanted}");
        return Ok(false);
    }

    if !config.verify_existing {
        return Ok(true);
    }

    let actual = Sha256Digest::of(&std::fs::read(path)?);
    if actual == *config.release.sha256() {
        return Ok(true);
    }
    log::warn!("{path} reports version {found} but hashes to {actual}");
    if !config.quiet {
        write_line(out, stale_artifact_message(config.release.artifact_name()));
    }
    Ok(false)
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
