//! waf bootstrap CLI entrypoint.
//!
//! Ensures a verified copy of the pinned waf release exists and reports the
//! result through the exit status: 0 on success, 1 when the download fails
//! its checksum, 2 on any other error.

use clap::Parser;
use std::io::Write;
use waf_bootstrap::cli::Cli;
use waf_bootstrap::error::Result;
use waf_bootstrap::fetcher::{Outcome, ensure_artifact};
use waf_bootstrap::output::write_line;

/// Exit status for failures other than a checksum mismatch.
const FAILURE_EXIT_CODE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let result = ensure_artifact(&cli.fetch_config(), &mut stdout);
    let exit_code = exit_code_for_run_result(result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().default_filter_or(cli.log_filter());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

fn exit_code_for_run_result(result: Result<Outcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            log::debug!("run failed: {err:?}");
            write_line(stderr, format!("error: {err}"));
            FAILURE_EXIT_CODE
        }
    }
}
