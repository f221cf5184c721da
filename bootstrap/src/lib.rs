//! Bootstrap library for the waf build system.
//!
//! Downloads a pinned waf release into a directory, checks the bytes against
//! a compiled-in SHA-256 digest and writes the script out with the owner
//! execute bit set. An existing script that already reports the pinned
//! version is left alone.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`download`] - HTTP download behind a mockable trait
//! - [`error`] - Error types for failed runs
//! - [`fetcher`] - The check, download, verify and install flow
//! - [`install`] - Writing the artefact with the owner execute bit
//! - [`output`] - User-facing messages
//! - [`release`] - The pinned release constants
//! - [`sha256_digest`] - Validated SHA-256 digest newtype
//! - [`version`] - Querying an existing artefact's version

pub mod cli;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod install;
pub mod output;
pub mod release;
pub mod sha256_digest;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod version;
