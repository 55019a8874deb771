//! Shared helpers for integration tests: run a registry into an in-memory,
//! colourless console and hand back the counts and the rendered report.

#![allow(dead_code)]

use rollcall::console::Console;
use rollcall::registry::Registry;
use rollcall::{Engine, FailurePolicy, RunSummary};
use termcolor::NoColor;

pub const WIDTH: u16 = 80;

pub fn render(registry: &Registry, policy: FailurePolicy) -> (RunSummary, String) {
    render_with_width(registry, policy, WIDTH)
}

pub fn render_with_width(
    registry: &Registry,
    policy: FailurePolicy,
    width: u16,
) -> (RunSummary, String) {
    let mut console = Console::new(NoColor::new(Vec::new()), width);
    let summary = Engine::new(registry, policy)
        .run(&mut console)
        .expect("in-memory report never fails to write");
    let text = String::from_utf8(console.into_inner().into_inner()).expect("report is utf-8");
    (summary, text)
}

/// The lines of `report` that belong to the failure block following `marker`.
pub fn block_after<'a>(report: &'a str, marker: &str) -> Vec<&'a str> {
    report
        .split_once(marker)
        .map(|(_, rest)| rest.lines().skip(1).take_while(|l| !l.is_empty()).collect())
        .unwrap_or_default()
}
