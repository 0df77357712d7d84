//! Terminal output for the CLI.
//!
//! Submodules:
//! - [`color`]: semantic colour helpers
//! - [`report`]: analysis reports and BFS level listings

pub mod color;
pub mod report;

use std::env;

pub use report::{format_analysis, format_levels, print_analysis, print_analysis_json, print_levels};

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Settings that control how reports are printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for wrapped lists.
    pub max_width: usize,
    /// Whether to emit ANSI colours.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the environment.
    ///
    /// Reads:
    /// - `GRAPHLENS_MAX_WIDTH`: maximum content width (default: terminal
    ///   width, capped at 100)
    /// - `NO_COLOR`: any value disables colours
    /// - `GRAPHLENS_COLOR`: `0` or `false` disables colours
    #[must_use]
    pub fn from_env() -> Self {
        let default_width = terminal_width().min(DEFAULT_MAX_CONTENT_WIDTH);
        let max_width = match env::var("GRAPHLENS_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "GRAPHLENS_MAX_WIDTH",
                        value = %s,
                        default = default_width,
                        "Invalid value, using default"
                    );
                    default_width
                }
            },
            _ => default_width,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("GRAPHLENS_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}
