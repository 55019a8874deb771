//! # Rollcall: Suite and Case Metadata
//!
//! Read-only records describing every declared suite and case. Records are
//! created by the [`Registry`](crate::registry::Registry) during registration
//! and never mutated afterwards: fields are private and only accessors are
//! exposed.
//!
//! Each record carries the sequence number the registry assigned to it. The
//! registry keeps records in sequence order, which is declaration order.

use crate::failure::{Context, Outcome};
use std::fmt;

/// The signature every case body is lowered to by [`suite!`](crate::suite).
pub type CaseFn = fn(&mut Context) -> Outcome;

/// A single named test body.
#[derive(Clone, Copy)]
pub struct Case {
    name: &'static str,
    body: CaseFn,
    seq: u64,
}

impl Case {
    pub(crate) fn new(name: &'static str, body: CaseFn, seq: u64) -> Self {
        Self { name, body, seq }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registration sequence number, unique within one registry.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Invokes the body once with the given per-case context.
    pub fn run(&self, ctx: &mut Context) -> Outcome {
        (self.body)(ctx)
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("seq", &self.seq)
            .finish()
    }
}

/// A named, ordered group of cases.
#[derive(Debug, Clone)]
pub struct Suite {
    name: &'static str,
    seq: u64,
    cases: Vec<Case>,
}

impl Suite {
    pub(crate) fn new(name: &'static str, seq: u64) -> Self {
        Self {
            name,
            seq,
            cases: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Cases in declaration order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
