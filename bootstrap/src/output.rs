//! User-facing messages.
//!
//! Messages go to an injected writer so tests can capture them. They are
//! meant for people, not scripts.

use crate::sha256_digest::Sha256Digest;
use std::io::Write;

/// Lines reported when the downloaded bytes do not hash to the expected
/// digest.
///
/// # Examples
///
/// ```
/// use waf_bootstrap::output::checksum_mismatch_lines;
/// use waf_bootstrap::sha256_digest::Sha256Digest;
///
/// let expected = Sha256Digest::of(b"expected");
/// let actual = Sha256Digest::of(b"actual");
/// let lines = checksum_mismatch_lines(&actual, &expected);
/// assert_eq!(lines[1], format!(" - got:      {actual}"));
/// assert_eq!(lines[2], format!(" - expected: {expected}"));
/// ```
#[must_use]
pub fn checksum_mismatch_lines(actual: &Sha256Digest, expected: &Sha256Digest) -> [String; 4] {
    [
        "The checksum of the downloaded file does not match!".to_owned(),
        format!(" - got:      {actual}"),
        format!(" - expected: {expected}"),
        "Please download and verify the file manually.".to_owned(),
    ]
}

/// Progress line printed before the download starts.
#[must_use]
pub fn downloading_message(url: &str) -> String {
    format!("Downloading {url}...")
}

/// Line printed when a matching artefact is already present.
#[must_use]
pub fn skip_message(artifact_name: &str) -> String {
    format!("Found '{artifact_name}', skipping download.")
}

/// Line printed when a version-matched artefact fails re-verification.
#[must_use]
pub fn stale_artifact_message(artifact_name: &str) -> String {
    format!("Existing '{artifact_name}' failed verification, downloading again.")
}

/// Line printed after the artefact is verified and written.
pub const CHECKSUM_VERIFIED: &str = "Checksum verified.";

/// Write one line, ignoring failures.
pub fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_lines_align_digests() {
        let actual = Sha256Digest::of(b"tampered");
        let expected = Sha256Digest::of(b"genuine");
        let lines = checksum_mismatch_lines(&actual, &expected);
        let got = lines[1].find(actual.as_str()).expect("actual digest present");
        let want = lines[2].find(expected.as_str()).expect("expected digest present");
        assert_eq!(got, want);
    }

    #[test]
    fn skip_message_names_artifact() {
        assert_eq!(skip_message("waf"), "Found 'waf', skipping download.");
    }

    #[test]
    fn write_line_appends_newline() {
        let mut out = Vec::new();
        write_line(&mut out, downloading_message("http://example.test/waf"));
        assert_eq!(out, b"Downloading http://example.test/waf...\n");
    }
}
