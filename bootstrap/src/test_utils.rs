//! Shared test utilities for the bootstrap crate.

use crate::download::{ArtifactDownloader, DownloadError};
use crate::error::{BootstrapError, Result};
use crate::version::CommandExecutor;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code.unsigned_abs())
}

/// Creates the output `waf --version` prints for `version`.
#[must_use]
pub fn version_output(version: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: format!("waf {version} (54dc13ba5f51bfe2ae277451ec5ac1d0a91c7aaf)\n").into_bytes(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "./waf").
    pub cmd: String,
    /// The arguments to pass to the command.
    pub args: Vec<&'static str>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects.
#[derive(Debug, Default)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let Some(call) = self.expected.borrow_mut().pop_front() else {
            return Err(BootstrapError::StubMismatch {
                message: format!("unexpected invocation of {cmd} {args:?}"),
            });
        };
        if call.cmd != cmd || call.args.as_slice() != args {
            return Err(BootstrapError::StubMismatch {
                message: format!(
                    "expected {} {:?}, got {cmd} {args:?}",
                    call.cmd, call.args
                ),
            });
        }
        call.result
    }
}

/// A downloader that serves fixed bytes and counts how often it is asked.
#[derive(Debug)]
pub struct StubDownloader {
    payload: Option<Vec<u8>>,
    calls: Cell<usize>,
}

impl StubDownloader {
    /// Serve `payload` on every fetch.
    #[must_use]
    pub fn serving(payload: &[u8]) -> Self {
        Self {
            payload: Some(payload.to_vec()),
            calls: Cell::new(0),
        }
    }

    /// Fail every fetch with a connection error.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            payload: None,
            calls: Cell::new(0),
        }
    }

    /// Number of fetches performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ArtifactDownloader for StubDownloader {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, DownloadError> {
        self.calls.set(self.calls.get() + 1);
        self.payload.clone().ok_or_else(|| DownloadError::HttpError {
            url: url.to_owned(),
            reason: "connection refused".to_owned(),
        })
    }
}
