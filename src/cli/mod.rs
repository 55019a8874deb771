//! The Rollcall entry point.
//!
//! [`run`] is what `rollcall::test_main!()` calls: it parses arguments,
//! installs logging, optionally waits for a debugger, and runs the global
//! registry against stdout.

use crate::cli::args::HarnessArgs;
use crate::config::HarnessConfig;
use crate::console::Console;
use crate::engine::{Engine, RunSummary};
use crate::errors::HarnessError;
use crate::registry;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod args;

/// Prompt shown by `--wait-for-debugger`.
pub const ATTACH_PROMPT: &str = "Attach now and press Enter to continue...";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ROLLCALL_LOG";

/// Exit status used when the harness itself fails.
const HARNESS_FAILURE: u8 = 2;

/// The main entry point for test binaries.
pub fn run() -> ExitCode {
    let config = HarnessArgs::parse().into_config();
    init_logging();

    match run_with(&config) {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(HARNESS_FAILURE)
        }
    }
}

/// Runs the global registry with an explicit configuration.
pub fn run_with(config: &HarnessConfig) -> Result<RunSummary, HarnessError> {
    if config.wait_for_debugger {
        let stdin = io::stdin();
        wait_for_debugger(&mut stdin.lock(), &mut io::stdout())?;
    }

    let mut console = Console::stdout(config);
    Engine::new(registry::global(), config.policy).run(&mut console)
}

/// Prints the attach prompt and blocks until a line arrives.
pub fn wait_for_debugger<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(), HarnessError> {
    write!(output, "{}", ATTACH_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(HarnessError::Stdin)?;
    Ok(())
}

/// Installs the stderr subscriber. Returns false when one was already set,
/// by an earlier call or by the host process; that one is kept.
fn init_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "keeping the existing log subscriber");
            false
        }
    }
}
