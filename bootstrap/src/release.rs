//! The pinned waf release and its expected digest.

use crate::sha256_digest::Sha256Digest;

/// Release tag of the pinned waf build.
pub const WAF_RELEASE: &str = "waf-1.8.6";

/// Directory on waf.io that serves release scripts.
pub const WAF_RELEASE_BASE_URL: &str = "http://waf.io/pub/release/";

/// SHA-256 of the pinned release script.
pub const WAF_SHA256: &str = "81c4e6a3144c7b2021a839e7277bdaf1cedbbc87302186897b4ae03f4effcbf5";

/// File name the artefact is stored under.
pub const WAF_ARTIFACT_NAME: &str = "waf";

/// A downloadable release: where it lives, what it hashes to and where it is
/// stored locally.
///
/// # Examples
///
/// ```
/// use waf_bootstrap::release::Release;
///
/// let release = Release::pinned();
/// assert_eq!(release.version(), "1.8.6");
/// assert_eq!(release.url(), "http://waf.io/pub/release/waf-1.8.6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    tag: String,
    url: String,
    sha256: Sha256Digest,
    artifact_name: String,
}

impl Release {
    /// Describe a release explicitly.
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        url: impl Into<String>,
        sha256: Sha256Digest,
        artifact_name: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            url: url.into(),
            sha256,
            artifact_name: artifact_name.into(),
        }
    }

    /// The waf release this tool is compiled to fetch.
    #[must_use]
    pub fn pinned() -> Self {
        Self {
            tag: WAF_RELEASE.to_owned(),
            url: format!("{WAF_RELEASE_BASE_URL}{WAF_RELEASE}"),
            sha256: Sha256Digest::trusted(WAF_SHA256),
            artifact_name: WAF_ARTIFACT_NAME.to_owned(),
        }
    }

    /// Release tag, e.g. `waf-1.8.6`.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Version token derived from the tag: the second `-`-separated field,
    /// so `waf-2.0.0-rc1` yields `2.0.0`.
    ///
    /// A tag without a `-` is its own version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.tag.split('-').nth(1).unwrap_or(self.tag.as_str())
    }

    /// Download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Expected digest of the downloaded bytes.
    #[must_use]
    pub fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }

    /// Local file name of the artefact.
    #[must_use]
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }
}

impl Default for Release {
    fn default() -> Self {
        Self::pinned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn pinned_release_uses_compiled_constants() {
        let release = Release::pinned();
        assert_eq!(release.tag(), "waf-1.8.6");
        assert_eq!(release.url(), "http://waf.io/pub/release/waf-1.8.6");
        assert_eq!(release.sha256().as_str(), WAF_SHA256);
        assert_eq!(release.artifact_name(), "waf");
    }

    #[test]
    fn pinned_digest_is_well_formed() {
        assert!(Sha256Digest::try_from(WAF_SHA256).is_ok());
    }

    #[rstest]
    #[case::waf("waf-1.8.6", "1.8.6")]
    #[case::prerelease("waf-2.0.0-rc1", "2.0.0")]
    #[case::bare("1.8.6", "1.8.6")]
    fn version_is_derived_from_tag(#[case] tag: &str, #[case] expected: &str) {
        let release = Release::new(tag, "http://example.test/", Sha256Digest::of(b""), "waf");
        assert_eq!(release.version(), expected);
    }
}
