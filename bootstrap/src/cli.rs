//! CLI argument definitions for the waf bootstrap tool.
//!
//! Every flag is optional: run bare, the tool fetches the compiled-in release
//! into the current directory.

use crate::fetcher::FetchConfig;
use crate::release::Release;
use camino::Utf8PathBuf;
use clap::Parser;

/// Download the pinned waf release and verify its SHA-256 digest.
#[derive(Parser, Debug, Clone)]
#[command(name = "waf-bootstrap")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0  waf is present at the pinned version, or was downloaded and verified\n",
    "  1  the downloaded file did not match the pinned checksum\n",
    "  2  any other failure (network, filesystem, version query)",
))]
pub struct Cli {
    /// Directory holding the waf script.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: Utf8PathBuf,

    /// Suppress progress output (checksum diagnostics still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Hash an existing waf that reports the pinned version instead of
    /// trusting it.
    #[arg(long)]
    pub verify_existing: bool,
}

impl Cli {
    /// Build the run configuration for the pinned release.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use waf_bootstrap::cli::Cli;
    /// use waf_bootstrap::fetcher::FetchConfig;
    ///
    /// let cli = Cli::parse_from(["waf-bootstrap"]);
    /// assert_eq!(cli.fetch_config(), FetchConfig::default());
    /// ```
    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            release: Release::pinned(),
            dir: self.dir.clone(),
            quiet: self.quiet,
            verify_existing: self.verify_existing,
        }
    }

    /// Default log filter for the requested verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bare_invocation_matches_compiled_defaults() {
        let cli = Cli::parse_from(["waf-bootstrap"]);
        assert_eq!(cli.fetch_config(), FetchConfig::default());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn flags_flow_into_config() {
        let cli = Cli::parse_from(["waf-bootstrap", "--dir", "tools", "--verify-existing", "-q"]);
        let config = cli.fetch_config();
        assert_eq!(config.dir, "tools");
        assert!(config.quiet);
        assert!(config.verify_existing);
        assert_eq!(config.release, Release::pinned());
    }

    #[rstest]
    #[case(&["waf-bootstrap", "-v"], "info")]
    #[case(&["waf-bootstrap", "-vv"], "debug")]
    #[case(&["waf-bootstrap", "-vvvv"], "trace")]
    fn verbosity_maps_to_filter(#[case] args: &[&str], #[case] expected: &str) {
        let cli = Cli::parse_from(args);
        assert_eq!(cli.log_filter(), expected);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["waf-bootstrap", "-q", "-v"]);
        assert!(result.is_err());
    }
}
