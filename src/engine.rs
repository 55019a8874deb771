//! # Rollcall: Execution Engine
//!
//! Walks a [`Registry`] suite by suite and case by case, runs every body
//! synchronously on the calling thread, and hands each outcome to the
//! reporter.
//!
//! Each case gets a fresh [`Context`]. A body that panics is contained at
//! the case boundary: the panic is recorded as a failure and the run moves
//! on to the next case. A body that never returns blocks the run; there is
//! no timeout.

use crate::console::Console;
use crate::errors::HarnessError;
use crate::failure::{Context, Failure, FailurePolicy};
use crate::metadata::Case;
use crate::registry::Registry;
use crate::report;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use termcolor::WriteColor;
use tracing::{debug, debug_span, info};

mod trap;

use trap::PanicTrap;

/// Pass/fail counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: u32,
    pub failed: u32,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total_cases(&self) -> u32 {
        self.succeeded + self.failed
    }

    /// 1 when any case failed, 0 otherwise.
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_failures())
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

pub struct Engine<'r> {
    registry: &'r Registry,
    policy: FailurePolicy,
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry, policy: FailurePolicy) -> Self {
        Self { registry, policy }
    }

    /// Runs every registered case and prints the report.
    pub fn run<W: WriteColor>(
        &self,
        console: &mut Console<W>,
    ) -> Result<RunSummary, HarnessError> {
        let trap = PanicTrap::install();
        let mut summary = RunSummary::default();

        for suite in self.registry.suites() {
            let _span = debug_span!("suite", name = suite.name()).entered();
            report::suite_header(console, suite)?;

            for case in suite.cases() {
                report::case_name(console, case)?;
                console.flush()?;

                let failures = self.run_case(case, &trap);
                if failures.is_empty() {
                    summary.succeeded += 1;
                    report::success(console)?;
                } else {
                    summary.failed += 1;
                    report::failures(console, &failures)?;
                }
            }
        }

        report::summary(console, &summary)?;
        console.flush()?;

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "run finished"
        );
        Ok(summary)
    }

    fn run_case(&self, case: &Case, trap: &PanicTrap) -> Vec<Failure> {
        let mut ctx = Context::new(self.policy);

        let result = panic::catch_unwind(AssertUnwindSafe(|| case.run(&mut ctx)));
        if let Err(payload) = result {
            // A halted fail-fast context already holds its one failure.
            let _ = ctx.record(trap.failure(payload));
        }

        debug!(
            case = case.name(),
            failures = ctx.failures().len(),
            halted = ctx.is_halted(),
            "case finished"
        );
        ctx.into_failures()
    }
}
