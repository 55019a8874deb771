//! # Rollcall: Suite Registry
//!
//! The registry is the catalog of every declared suite and case. It is built
//! in one of two ways:
//!
//! - explicitly, through [`Registry::suite`] and [`SuiteBuilder::case`];
//! - from the link-time [`BOOTSTRAPS`] table that every [`suite!`](crate::suite)
//!   declaration contributes an entry to. [`global`] runs those entries once,
//!   on first access, and hands out the finished catalog.
//!
//! Registry Invariant: every registration takes the next value of the
//! registry's sequence counter, and traversal follows that order. Bootstrap
//! entries are sorted by source location before they run, so the catalog
//! never depends on link order. Once built, the catalog is read-only.

use crate::metadata::{Case, CaseFn, Suite};
use linkme::distributed_slice;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

/// One `suite!` declaration's entry in the link-time table.
#[derive(Debug)]
pub struct Bootstrap {
    pub file: &'static str,
    pub line: u32,
    pub register: fn(&mut Registry),
}

#[doc(hidden)]
#[distributed_slice]
pub static BOOTSTRAPS: [Bootstrap] = [..];

static GLOBAL: Lazy<Registry> = Lazy::new(|| Registry::from_bootstraps(&BOOTSTRAPS));

/// The process-wide registry, fully populated before it is returned.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Append-only, ordered catalog of suites.
#[derive(Debug, Default)]
pub struct Registry {
    suites: Vec<Suite>,
    next_seq: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every bootstrap entry in (file, line) order.
    pub fn from_bootstraps(bootstraps: &[Bootstrap]) -> Self {
        let mut ordered: Vec<&Bootstrap> = bootstraps.iter().collect();
        ordered.sort_by(|a, b| (a.file, a.line).cmp(&(b.file, b.line)));

        let mut registry = Self::new();
        for bootstrap in ordered {
            (bootstrap.register)(&mut registry);
        }

        debug!(
            suites = registry.suites.len(),
            cases = registry.case_count(),
            "registry built"
        );
        registry
    }

    /// Registers a suite named `name`; `declare` adds its cases.
    pub fn suite<F>(&mut self, name: &'static str, declare: F) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        if self.suites.iter().any(|s| s.name() == name) {
            warn!(suite = name, "suite name registered more than once");
        }

        let mut suite = Suite::new(name, take_seq(&mut self.next_seq));
        declare(&mut SuiteBuilder {
            suite: &mut suite,
            next_seq: &mut self.next_seq,
        });
        self.suites.push(suite);
        self
    }

    /// Suites in registration order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn case_count(&self) -> usize {
        self.suites.iter().map(|s| s.cases().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

/// Handle through which cases attach to the suite being declared.
pub struct SuiteBuilder<'r> {
    suite: &'r mut Suite,
    next_seq: &'r mut u64,
}

impl SuiteBuilder<'_> {
    pub fn case(&mut self, name: &'static str, body: CaseFn) -> &mut Self {
        let seq = take_seq(self.next_seq);
        self.suite.push(Case::new(name, body, seq));
        self
    }
}

fn take_seq(counter: &mut u64) -> u64 {
    let seq = *counter;
    *counter += 1;
    seq
}
