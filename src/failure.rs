//! # Rollcall: Failure Capture
//!
//! Assertions run against a [`Context`], the per-case object the engine
//! passes into every case body. A failed assertion becomes a [`Failure`]:
//! the message plus the call stack captured at that instant.
//!
//! What happens next depends on the [`FailurePolicy`]:
//!
//! - **Continue** (default): the failure is appended and the body keeps
//!   running. The case fails if any failure was recorded.
//! - **FailFast**: the first failure is recorded and the assertion returns
//!   `Err(Halt)`, so a body written with `?` stops right there. A halted
//!   context records nothing further.

use std::fmt::Debug;
use thiserror::Error;

pub mod stack;

pub use stack::{Frame, Location, Stack, MAX_STACK_FRAMES};

/// Tolerance used by [`Context::are_near`].
pub const EPSILON: f64 = 0.0001;

/// Message used by [`Context::check`].
pub const DEFAULT_MESSAGE: &str = "Assert failed.";

/// Result of an assertion and of a whole case body.
pub type Outcome = Result<(), Halt>;

/// Returned under fail-fast once a case has recorded its failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("case halted after a failed assertion")]
pub struct Halt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    FailFast,
}

/// A failed assertion.
#[derive(Debug, Clone)]
pub struct Failure {
    message: String,
    stack: Stack,
}

impl Failure {
    pub fn new(message: impl Into<String>, stack: Stack) -> Self {
        Self {
            message: message.into(),
            stack,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }
}

/// Per-case assertion state.
#[derive(Debug, Default)]
pub struct Context {
    policy: FailurePolicy,
    failures: Vec<Failure>,
    halted: bool,
}

impl Context {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            failures: Vec::new(),
            halted: false,
        }
    }

    /// Records a failure unconditionally.
    #[inline(never)]
    pub fn fail(&mut self, message: impl Into<String>) -> Outcome {
        if self.halted {
            return Err(Halt);
        }
        self.record(Failure::new(message, Stack::capture()))
    }

    pub fn is_true(&mut self, condition: bool, message: impl Into<String>) -> Outcome {
        if self.halted {
            return Err(Halt);
        }
        if condition {
            Ok(())
        } else {
            self.fail(message)
        }
    }

    pub fn is_false(&mut self, condition: bool, message: impl Into<String>) -> Outcome {
        self.is_true(!condition, message)
    }

    /// `is_true` with the stock message.
    pub fn check(&mut self, condition: bool) -> Outcome {
        self.is_true(condition, DEFAULT_MESSAGE)
    }

    pub fn are_equal<L, R>(&mut self, left: L, right: R) -> Outcome
    where
        L: PartialEq<R> + Debug,
        R: Debug,
    {
        if left == right {
            return self.is_true(true, "");
        }
        self.fail(format!(
            "are_equal failed: left `{:?}`, right `{:?}`",
            left, right
        ))
    }

    pub fn are_near(&mut self, left: f64, right: f64) -> Outcome {
        if left >= right - EPSILON && left <= right + EPSILON {
            return self.is_true(true, "");
        }
        self.fail(format!(
            "are_near failed: left `{}`, right `{}` (tolerance {})",
            left, right, EPSILON
        ))
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Applies the policy to an already built failure.
    pub(crate) fn record(&mut self, failure: Failure) -> Outcome {
        if self.halted {
            return Err(Halt);
        }
        self.failures.push(failure);
        match self.policy {
            FailurePolicy::Continue => Ok(()),
            FailurePolicy::FailFast => {
                self.halted = true;
                Err(Halt)
            }
        }
    }
}

/// What a case body may evaluate to.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Ok(())
    }
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_policy_accumulates_every_failure() {
        let mut ctx = Context::new(FailurePolicy::Continue);

        assert_eq!(ctx.is_true(false, "m1"), Ok(()));
        assert_eq!(ctx.is_true(true, "not recorded"), Ok(()));
        assert_eq!(ctx.fail("m2"), Ok(()));

        let messages: Vec<_> = ctx.failures().iter().map(Failure::message).collect();
        assert_eq!(messages, ["m1", "m2"]);
        assert!(!ctx.is_halted());
    }

    #[test]
    fn fail_fast_policy_keeps_only_the_first_failure() {
        let mut ctx = Context::new(FailurePolicy::FailFast);

        assert_eq!(ctx.is_true(true, "fine"), Ok(()));
        assert_eq!(ctx.is_true(false, "first"), Err(Halt));
        assert_eq!(ctx.fail("second"), Err(Halt));
        assert_eq!(ctx.is_true(true, "after halt"), Err(Halt));

        assert_eq!(ctx.failures().len(), 1);
        assert_eq!(ctx.failures()[0].message(), "first");
        assert!(ctx.is_halted());
    }

    #[test]
    fn fail_fast_stops_a_body_written_with_question_mark() {
        fn body(ctx: &mut Context, reached: &mut bool) -> Outcome {
            ctx.fail("stop")?;
            *reached = true;
            Ok(())
        }

        let mut ctx = Context::new(FailurePolicy::FailFast);
        let mut reached = false;
        assert_eq!(body(&mut ctx, &mut reached), Err(Halt));
        assert!(!reached);
    }

    #[test]
    fn failures_carry_a_captured_stack() {
        let mut ctx = Context::default();
        let _ = ctx.fail("with stack");
        assert!(!ctx.failures()[0].stack().is_empty());
    }

    #[test]
    fn check_uses_the_default_message() {
        let mut ctx = Context::default();
        let _ = ctx.check(false);
        assert_eq!(ctx.failures()[0].message(), DEFAULT_MESSAGE);
    }

    #[test]
    fn is_false_inverts_the_condition() {
        let mut ctx = Context::default();
        let _ = ctx.is_false(false, "ok");
        let _ = ctx.is_false(true, "flagged");
        assert_eq!(ctx.failures().len(), 1);
        assert_eq!(ctx.failures()[0].message(), "flagged");
    }

    #[test]
    fn are_equal_reports_both_sides() {
        let mut ctx = Context::default();
        let _ = ctx.are_equal(3, 3);
        let _ = ctx.are_equal("left", "right");

        assert_eq!(ctx.failures().len(), 1);
        assert_eq!(
            ctx.failures()[0].message(),
            "are_equal failed: left `\"left\"`, right `\"right\"`"
        );
    }

    #[test]
    fn are_near_accepts_values_within_epsilon() {
        let mut ctx = Context::default();
        let _ = ctx.are_near(1.0, 1.00005);
        let _ = ctx.are_near(1.0, 1.1);
        let _ = ctx.are_near(f64::NAN, f64::NAN);
        assert_eq!(ctx.failures().len(), 2);
    }

    #[test]
    fn unit_and_outcome_convert_into_outcomes() {
        assert_eq!(().into_outcome(), Ok(()));
        assert_eq!(Err::<(), _>(Halt).into_outcome(), Err(Halt));
    }
}
