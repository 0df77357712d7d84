//! Colour and styling helpers for CLI output.
//!
//! Semantic colour theme:
//!   - Success: green  (connected graph, no isolated nodes)
//!   - Warning: yellow (disconnected graph, cycles)
//!   - Error:   red    (isolated nodes)
//!   - Info:    cyan   (node keys, numeric values)
//!   - Muted:   dimmed (field labels)
//!   - Emphasis: bold  (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" colour (green) to text.
#[must_use]
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" colour (yellow) to text.
#[must_use]
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "error" colour (red) to text.
#[must_use]
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "info" colour (cyan) to text.
#[must_use]
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    // `set_override` is process-wide.
    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl ColorGuard<'_> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX.lock().unwrap();
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    #[test]
    fn colors_are_applied_when_enabled() {
        let _guard = ColorGuard::new();
        let config = OutputConfig::new(80, true);

        for styled in [
            success("ok", &config),
            warning("hm", &config),
            error("bad", &config),
            info("7", &config),
            bold("Title", &config),
        ] {
            assert!(styled.contains("\x1b["), "missing ANSI codes in {styled:?}");
        }
    }

    #[test]
    fn plain_text_when_disabled() {
        let config = OutputConfig::new(80, false);
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(dimmed("label", &config), "label");
    }
}
