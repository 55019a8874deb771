//! Console service used by the reporter.
//!
//! The console wraps any [`WriteColor`] sink, remembers which column the
//! cursor is on and how wide the window is. The reporter only ever asks
//! for those two numbers and for plain or coloured text.
//!
//! Case bodies may write to stdout themselves. A console attached to a
//! terminal therefore asks the terminal where the cursor really is before
//! aligning a result; other sinks rely on the column tracked from their
//! own output.

use crate::config::HarnessConfig;
use std::io;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

/// Width assumed when the terminal cannot be queried.
pub const DEFAULT_WIDTH: u16 = 80;

/// The colours the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Red,
    Green,
    Gray,
}

impl Tone {
    pub(crate) fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Tone::Red => spec.set_fg(Some(Color::Red)).set_intense(true),
            Tone::Green => spec.set_fg(Some(Color::Green)).set_intense(true),
            Tone::Gray => spec.set_fg(Some(Color::White)).set_intense(false),
        };
        spec
    }
}

/// Reads the live zero-based cursor column, `None` when it is unknown.
pub type CursorQuery = fn() -> Option<u16>;

pub struct Console<W> {
    out: W,
    column: usize,
    width: u16,
    cursor: Option<CursorQuery>,
}

impl Console<StandardStream> {
    pub fn stdout(config: &HarnessConfig) -> Self {
        let width = config.width.unwrap_or_else(terminal_width);
        let console = Self::new(StandardStream::stdout(config.color), width);
        if stdout_is_terminal() {
            console.with_cursor_query(terminal_cursor_column)
        } else {
            console
        }
    }
}

impl<W: WriteColor> Console<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self {
            out,
            column: 0,
            width,
            cursor: None,
        }
    }

    /// Consults `query` for the cursor column instead of trusting only the
    /// text this console wrote.
    pub fn with_cursor_query(mut self, query: CursorQuery) -> Self {
        self.cursor = Some(query);
        self
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.advance(text);
        Ok(())
    }

    pub fn print_colored(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.out.set_color(&tone.spec())?;
        self.out.write_all(text.as_bytes())?;
        self.out.reset()?;
        self.advance(text);
        Ok(())
    }

    /// Zero-based cursor column, as tracked from this console's output.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Zero-based cursor column right now.
    ///
    /// With a cursor query the pending output is flushed and the live
    /// column replaces the tracked one. Without one, or when the query
    /// gives no answer, this is [`Console::column`].
    pub fn cursor_column(&mut self) -> io::Result<usize> {
        if let Some(query) = self.cursor {
            self.out.flush()?;
            if let Some(live) = query() {
                self.column = usize::from(live);
            }
        }
        Ok(self.column)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(i) => self.column = text[i + 1..].width(),
            None => self.column += text.width(),
        }
    }
}

/// Current terminal width, or [`DEFAULT_WIDTH`] when stdout is not a
/// terminal or the terminal cannot be queried.
pub fn terminal_width() -> u16 {
    if !stdout_is_terminal() {
        return DEFAULT_WIDTH;
    }
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| cols)
        .filter(|&cols| cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

fn stdout_is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn terminal_cursor_column() -> Option<u16> {
    crossterm::cursor::position().ok().map(|(col, _)| col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Ansi, NoColor};

    fn text(console: Console<NoColor<Vec<u8>>>) -> String {
        String::from_utf8(console.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn column_tracks_text_since_the_last_newline() {
        let mut console = Console::new(NoColor::new(Vec::new()), 40);
        console.print("  abc").unwrap();
        assert_eq!(console.column(), 5);

        console.print("de\nfg").unwrap();
        assert_eq!(console.column(), 2);

        console.print("\n").unwrap();
        assert_eq!(console.column(), 0);
        assert_eq!(text(console), "  abcde\nfg\n");
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let mut console = Console::new(NoColor::new(Vec::new()), 40);
        console.print("日本").unwrap();
        assert_eq!(console.column(), 4);
    }

    #[test]
    fn colored_text_advances_like_plain_text() {
        let mut console = Console::new(NoColor::new(Vec::new()), 40);
        console.print_colored(Tone::Green, "SUCCEEDED").unwrap();
        assert_eq!(console.column(), 9);
        assert_eq!(text(console), "SUCCEEDED");
    }

    #[test]
    fn cursor_column_without_query_is_the_tracked_column() {
        let mut console = Console::new(NoColor::new(Vec::new()), 40);
        console.print("  quiet").unwrap();
        assert_eq!(console.cursor_column().unwrap(), 7);
    }

    #[test]
    fn cursor_query_overrides_the_tracked_column() {
        // The cursor sits at column 0 after a body printed its own line.
        let mut console =
            Console::new(NoColor::new(Vec::new()), 40).with_cursor_query(|| Some(0));
        console.print("  prints_output").unwrap();
        assert_eq!(console.column(), 15);

        assert_eq!(console.cursor_column().unwrap(), 0);
        assert_eq!(console.column(), 0);
    }

    #[test]
    fn unanswered_cursor_query_falls_back_to_tracking() {
        let mut console = Console::new(NoColor::new(Vec::new()), 40).with_cursor_query(|| None);
        console.print("  abc").unwrap();
        assert_eq!(console.cursor_column().unwrap(), 5);
    }

    #[test]
    fn terminal_width_is_never_zero() {
        assert!(terminal_width() > 0);
    }

    #[test]
    fn ansi_sink_receives_escape_codes_that_do_not_move_the_column() {
        let mut console = Console::new(Ansi::new(Vec::new()), 40);
        console.print_colored(Tone::Red, "FAILED").unwrap();
        assert_eq!(console.column(), 6);

        let raw = String::from_utf8(console.into_inner().into_inner()).unwrap();
        assert!(raw.contains("\x1b["));
        assert!(raw.contains("FAILED"));
    }
}
