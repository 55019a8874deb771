//! # Rollcall: Report Rendering
//!
//! Stateless rendering of the run report. Every function writes to the
//! [`Console`] it is handed and relies only on the console's cursor column
//! and window width.
//!
//! ```text
//!
//! arithmetic
//!   adds.................................SUCCEEDED
//!   divides.................................FAILED
//!
//!   1 of 2: divide by zero
//!     demo::divides (src/bin/demo.rs:14)
//!
//! SUCCEEDED.........1
//! FAILED............1
//! ```

use crate::console::{Console, Tone};
use crate::engine::RunSummary;
use crate::failure::{Failure, Stack};
use crate::metadata::{Case, Suite};
use std::io;
use termcolor::WriteColor;
use unicode_width::UnicodeWidthStr;

pub const SUCCEEDED: &str = "SUCCEEDED";
pub const FAILED: &str = "FAILED";

/// Right edge used for the summary lines.
pub const MAX_RESULT_COLUMN_WIDTH: u16 = 20;

const WRAP_INDENT: &str = "    ";
const FRAME_INDENT: &str = "    ";

pub fn suite_header<W: WriteColor>(console: &mut Console<W>, suite: &Suite) -> io::Result<()> {
    console.print(&format!("\n{}\n", suite.name()))
}

/// Leaves the cursor after the name so the result can share the line.
pub fn case_name<W: WriteColor>(console: &mut Console<W>, case: &Case) -> io::Result<()> {
    console.print(&format!("  {}", case.name()))
}

pub fn success<W: WriteColor>(console: &mut Console<W>) -> io::Result<()> {
    right_aligned(console, Tone::Green, SUCCEEDED, None)
}

/// Prints the failed marker, then every failure with its resolved stack.
pub fn failures<W: WriteColor>(console: &mut Console<W>, failures: &[Failure]) -> io::Result<()> {
    right_aligned(console, Tone::Red, FAILED, None)?;

    let total = failures.len();
    for (index, failure) in failures.iter().enumerate() {
        console.print("\n  ")?;
        if total > 1 {
            console.print_colored(Tone::Red, &format!("{} of {}: ", index + 1, total))?;
        }
        console.print_colored(Tone::Red, failure.message())?;
        console.print("\n")?;
        call_stack(console, failure.stack())?;
    }

    console.print("\n")
}

pub fn call_stack<W: WriteColor>(console: &mut Console<W>, stack: &Stack) -> io::Result<()> {
    for frame in stack.resolve() {
        console.print(FRAME_INDENT)?;
        console.print_colored(Tone::Red, &frame.to_string())?;
        console.print("\n")?;
    }
    Ok(())
}

pub fn summary<W: WriteColor>(console: &mut Console<W>, summary: &RunSummary) -> io::Result<()> {
    console.print("\n")?;
    summary_line(console, SUCCEEDED, Tone::Green, summary.succeeded)?;
    summary_line(console, FAILED, Tone::Red, summary.failed)?;
    console.print("\n")
}

fn summary_line<W: WriteColor>(
    console: &mut Console<W>,
    label: &str,
    tone: Tone,
    count: u32,
) -> io::Result<()> {
    console.print(label)?;
    let tone = if count > 0 { tone } else { Tone::Gray };
    right_aligned(console, tone, &count.to_string(), Some(MAX_RESULT_COLUMN_WIDTH))
}

/// Prints `result` against the right edge, dot-filling from the cursor.
///
/// The edge is the window width, or `right_edge` when that is narrower.
pub fn right_aligned<W: WriteColor>(
    console: &mut Console<W>,
    tone: Tone,
    result: &str,
    right_edge: Option<u16>,
) -> io::Result<()> {
    fill_dots(console, result.width(), right_edge, false)?;
    console.print_colored(tone, result)?;
    console.print("\n")
}

fn fill_dots<W: WriteColor>(
    console: &mut Console<W>,
    result_width: usize,
    right_edge: Option<u16>,
    wrapped: bool,
) -> io::Result<()> {
    let edge = right_edge.map_or(console.width(), |e| e.min(console.width())) as isize;
    let column = console.cursor_column()? as isize;

    let dots = edge - column - result_width as isize - 1;
    if dots >= 0 {
        return console.print(&".".repeat(dots as usize));
    }
    if wrapped {
        return Ok(());
    }

    // Finish this line with dots and place the result on the next one.
    let to_edge = (edge - column - 1).max(0) as usize;
    console.print(&".".repeat(to_edge))?;
    console.print("\n")?;
    console.print(WRAP_INDENT)?;
    fill_dots(console, result_width, right_edge, true)
}
