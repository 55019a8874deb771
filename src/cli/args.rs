//! Defines the command-line arguments of a test binary.
//!
//! This module uses the `clap` crate with its "derive" feature. Every flag
//! can also be set through an environment variable so a test binary can be
//! configured when it is launched by another tool.

use crate::config::HarnessConfig;
use crate::failure::FailurePolicy;
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Runs every registered test suite and prints a pass/fail report."
)]
pub struct HarnessArgs {
    /// Pause before running so a debugger can attach.
    #[arg(short = 'w', long, env = "ROLLCALL_WAIT")]
    pub wait_for_debugger: bool,

    /// Stop each case at its first failed assertion.
    #[arg(long, env = "ROLLCALL_FAIL_FAST")]
    pub fail_fast: bool,

    /// When to colour the report.
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, env = "ROLLCALL_COLOR")]
    pub color: ColorArg,

    /// Report width in columns. Defaults to the terminal width.
    #[arg(long, env = "ROLLCALL_WIDTH", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl HarnessArgs {
    pub fn into_config(self) -> HarnessConfig {
        let color = match self.color {
            ColorArg::Auto => HarnessConfig::detect_color(),
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        };
        let policy = if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Continue
        };

        HarnessConfig {
            color,
            policy,
            width: self.width,
            wait_for_debugger: self.wait_for_debugger,
        }
    }
}
