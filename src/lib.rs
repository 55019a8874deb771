//! # Rollcall
//!
//! A minimal unit-test harness. Suites declared with [`suite!`] register
//! themselves before `main` looks at them; [`test_main!`] runs every suite,
//! prints a column-aligned, colourised pass/fail report with the captured
//! stack of every failed assertion, and exits nonzero when anything failed.

pub use crate::engine::{Engine, RunSummary};
pub use crate::errors::HarnessError;
pub use crate::failure::{Context, Failure, FailurePolicy, Halt, Outcome};

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod failure;
pub mod metadata;
pub mod registry;
pub mod report;

mod macros;

#[doc(hidden)]
pub mod __private {
    pub use crate::registry::BOOTSTRAPS;
    pub use linkme::{self, distributed_slice};
}
