//! Rollcall Error Handling
//!
//! Errors of the harness itself. A failed assertion is never one of these:
//! it is recorded as a [`Failure`](crate::failure::Failure) and reported.

use miette::Diagnostic;
use std::io;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum HarnessError {
    #[error("failed to write the test report")]
    #[diagnostic(code(rollcall::io::report))]
    Report(#[from] io::Error),

    #[error("failed to read from stdin while waiting for a debugger")]
    #[diagnostic(
        code(rollcall::io::stdin),
        help("run without --wait-for-debugger when stdin is not interactive")
    )]
    Stdin(#[source] io::Error),
}
