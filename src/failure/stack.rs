//! Call-stack capture for failed assertions.
//!
//! Capture only records instruction addresses. Symbol names and source
//! locations are looked up by [`Stack::resolve`], which the reporter calls
//! when it prints a failure.

use std::ffi::c_void;
use std::fmt;

/// Upper bound on recorded frames per failure.
pub const MAX_STACK_FRAMES: usize = 1024;

/// Frames the unwinder itself may push above the capture routine.
const UNWINDER_SLACK: usize = 32;

/// Raw return addresses, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Vec<usize>,
}

impl Stack {
    /// Records the current call stack, starting at the caller of `capture`.
    #[inline(never)]
    pub fn capture() -> Self {
        let marker = Self::capture as fn() -> Self as usize;
        let mut raw: Vec<(usize, usize)> = Vec::new();

        backtrace::trace(|frame| {
            raw.push((frame.ip() as usize, frame.symbol_address() as usize));
            raw.len() < MAX_STACK_FRAMES + UNWINDER_SLACK
        });

        // Drop everything up to and including this function's own frame.
        let start = raw
            .iter()
            .position(|&(_, symbol)| symbol == marker)
            .map_or(0, |i| i + 1);

        let frames = raw
            .into_iter()
            .skip(start)
            .map(|(ip, _)| ip)
            .take(MAX_STACK_FRAMES)
            .collect();

        Self { frames }
    }

    pub fn from_addresses(frames: Vec<usize>) -> Self {
        let mut frames = frames;
        frames.truncate(MAX_STACK_FRAMES);
        Self { frames }
    }

    pub fn addresses(&self) -> &[usize] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Symbolizes every frame.
    pub fn resolve(&self) -> Vec<Frame> {
        self.frames.iter().map(|&ip| Frame::resolve(ip)).collect()
    }
}

/// Where a resolved frame points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Source { file: String, line: u32 },
    Address(usize),
}

/// One symbolized stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub symbol: String,
    pub location: Location,
}

impl Frame {
    const UNKNOWN_SYMBOL: &'static str = "<unknown>";

    fn resolve(ip: usize) -> Self {
        let mut symbol: Option<String> = None;
        let mut source: Option<(String, u32)> = None;

        // Return addresses point one past the call; look up the call itself.
        let lookup = ip.saturating_sub(1);
        backtrace::resolve(lookup as *mut c_void, |sym| {
            if symbol.is_none() {
                symbol = sym.name().map(|name| format!("{:#}", name));
            }
            if source.is_none() {
                if let (Some(file), Some(line)) = (sym.filename(), sym.lineno()) {
                    source = Some((file.display().to_string(), line));
                }
            }
        });

        let location = match source {
            Some((file, line)) => Location::Source { file, line },
            None => Location::Address(ip),
        };

        Self {
            symbol: symbol.unwrap_or_else(|| Self::UNKNOWN_SYMBOL.to_string()),
            location,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Source { file, line } => write!(f, "{} ({}:{})", self.symbol, file, line),
            Location::Address(addr) => write!(f, "{} (0x{:X})", self.symbol, addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_a_bounded_nonempty_stack() {
        let stack = Stack::capture();
        assert!(!stack.is_empty());
        assert!(stack.len() <= MAX_STACK_FRAMES);
    }

    #[test]
    fn from_addresses_truncates_to_the_frame_limit() {
        let stack = Stack::from_addresses(vec![1; MAX_STACK_FRAMES + 10]);
        assert_eq!(stack.len(), MAX_STACK_FRAMES);
    }

    #[test]
    fn frame_with_line_info_prints_file_and_line() {
        let frame = Frame {
            symbol: "demo::case".to_string(),
            location: Location::Source {
                file: "src/demo.rs".to_string(),
                line: 12,
            },
        };
        assert_eq!(frame.to_string(), "demo::case (src/demo.rs:12)");
    }

    #[test]
    fn frame_without_line_info_falls_back_to_address() {
        let frame = Frame {
            symbol: "<unknown>".to_string(),
            location: Location::Address(0xBEEF),
        };
        assert_eq!(frame.to_string(), "<unknown> (0xBEEF)");
    }

    #[test]
    fn unmapped_address_resolves_to_numeric_location() {
        let frame = Frame::resolve(0x10);
        assert_eq!(frame.location, Location::Address(0x10));
    }

    #[test]
    fn resolve_yields_one_frame_per_address() {
        let stack = Stack::capture();
        assert_eq!(stack.resolve().len(), stack.len());
    }
}
