//! Run configuration shared by the entry point, console and engine.

use crate::failure::FailurePolicy;
use termcolor::ColorChoice;

/// Configuration for test execution and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub color: ColorChoice,
    pub policy: FailurePolicy,
    /// Fixed report width; the terminal width is used when unset.
    pub width: Option<u16>,
    pub wait_for_debugger: bool,
}

impl HarnessConfig {
    /// Colour only when stdout is a terminal.
    pub fn detect_color() -> ColorChoice {
        if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            color: Self::detect_color(),
            policy: FailurePolicy::default(),
            width: None,
            wait_for_debugger: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_continues_after_failures() {
        let config = HarnessConfig::default();
        assert_eq!(config.policy, FailurePolicy::Continue);
        assert_eq!(config.width, None);
        assert!(!config.wait_for_debugger);
    }
}
