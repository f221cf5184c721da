//! Querying the self-reported version of an existing artefact.
//!
//! The artefact is run as `<path> --version` and the second space-separated
//! token of its output is taken as the version, e.g. `1.8.6` from
//! `waf 1.8.6 (54dc13ba5f51bfe2ae277451ec5ac1d0a91c7aaf)`.

use crate::error::{BootstrapError, Result};
use camino::Utf8Path;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use waf_bootstrap::version::{CommandExecutor, SystemCommandExecutor};
///
/// let output = SystemCommandExecutor.run("./waf", &["--version"])?;
/// assert!(output.status.success());
/// # Ok::<(), waf_bootstrap::error::BootstrapError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(BootstrapError::from)
    }
}

/// Run the artefact at `path` with `--version` and return the reported
/// version token.
///
/// `path` must contain a directory component (`./waf`, not `waf`) so the
/// artefact itself is run rather than whatever `PATH` resolves.
///
/// # Errors
///
/// Returns [`BootstrapError::VersionQuery`] when the command exits
/// unsuccessfully or prints a single field, and
/// [`BootstrapError::Io`] when it cannot be spawned.
pub fn query_version(executor: &dyn CommandExecutor, path: &Utf8Path) -> Result<String> {
    log::debug!("querying version of {path}");
    let output = executor.run(path.as_str(), &["--version"])?;
    if !output.status.success() {
        return Err(BootstrapError::VersionQuery {
            path: path.to_owned(),
            reason: format!("exited with {}", output.status),
        });
    }
    let stdout = String::from_utf8(output.stdout).map_err(|e| BootstrapError::VersionQuery {
        path: path.to_owned(),
        reason: format!("output is not UTF-8: {e}"),
    })?;
    parse_version_output(&stdout)
        .map(str::to_owned)
        .ok_or_else(|| BootstrapError::VersionQuery {
            path: path.to_owned(),
            reason: format!("no version token in {:?}", stdout.trim_end()),
        })
}

/// Extract the version token from `--version` output.
///
/// Returns `None` when the output has no second space-separated field. An
/// empty second field (two spaces in a row) is returned as `""`, which never
/// matches a release version.
///
/// # Examples
///
/// ```
/// use waf_bootstrap::version::parse_version_output;
///
/// assert_eq!(parse_version_output("waf 1.8.6 (54dc13ba)\n"), Some("1.8.6"));
/// assert_eq!(parse_version_output("waf  1.8.6\n"), Some(""));
/// assert_eq!(parse_version_output("waf\n"), None);
/// ```
#[must_use]
pub fn parse_version_output(output: &str) -> Option<&str> {
    output.split(' ').nth(1).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, version_output};
    use rstest::rstest;

    #[rstest]
    #[case::with_revision("waf 1.8.6 (54dc13ba5f51bfe2ae277451ec5ac1d0a91c7aaf)\n", Some("1.8.6"))]
    #[case::trailing_newline("waf 1.8.6\n", Some("1.8.6"))]
    #[case::other_version("waf 2.0.26 (abc)\n", Some("2.0.26"))]
    #[case::single_word("waf\n", None)]
    #[case::empty("", None)]
    #[case::double_space("waf  1.8.6", Some(""))]
    fn parses_second_token(#[case] output: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_version_output(output), expected);
    }

    #[test]
    fn query_version_invokes_artifact_by_path() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            cmd: "./waf".to_owned(),
            args: vec!["--version"],
            result: Ok(version_output("1.8.6")),
        }]);

        let version = query_version(&executor, Utf8Path::new("./waf")).expect("version");

        assert_eq!(version, "1.8.6");
        executor.assert_finished();
    }

    #[test]
    fn query_version_rejects_failed_invocation() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            cmd: "./waf".to_owned(),
            args: vec!["--version"],
            result: Ok(failure_output("boom")),
        }]);

        let err = query_version(&executor, Utf8Path::new("./waf")).expect_err("should fail");

        assert!(matches!(err, BootstrapError::VersionQuery { .. }), "{err}");
    }

    #[test]
    fn query_version_rejects_output_without_token() {
        let mut output = version_output("1.8.6");
        output.stdout = b"waf\n".to_vec();
        let executor = StubExecutor::new(vec![ExpectedCall {
            cmd: "./waf".to_owned(),
            args: vec!["--version"],
            result: Ok(output),
        }]);

        let err = query_version(&executor, Utf8Path::new("./waf")).expect_err("should fail");

        assert!(err.to_string().contains("no version token"), "{err}");
    }

    #[test]
    fn query_version_propagates_spawn_errors() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            cmd: "./waf".to_owned(),
            args: vec!["--version"],
            result: Err(BootstrapError::Io(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            ))),
        }]);

        let err = query_version(&executor, Utf8Path::new("./waf")).expect_err("should fail");

        assert!(matches!(err, BootstrapError::Io(_)), "{err}");
    }
}
