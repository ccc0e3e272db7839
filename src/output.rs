//! # Output Configuration
//!
//! Terminal presentation for the command-line tool: whether to decorate
//! output with emoji, and how combination diagnostics and load orders are
//! rendered.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables decoration when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables decoration
//! - `CLICOLOR_FORCE=1` - Forces decoration even in non-TTY
//! - `TERM=dumb` - Disables decoration for dumb terminals

use std::env;
use std::fmt::Write;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` and `never` are honored as-is; anything else detects support
    /// from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables, even when empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Decorated reports go to stdout
        console::Term::stdout().features().colors_supported()
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when decoration is enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render errors and warnings, one per line.
///
/// Returns an empty string when there is nothing to report.
pub fn render_diagnostics(config: &OutputConfig, errors: &[String], warnings: &[String]) -> String {
    let mut out = String::new();
    for error in errors {
        let _ = writeln!(out, "{} {}", emoji(config, "❌", "[ERR]"), error);
    }
    for warning in warnings {
        let _ = writeln!(out, "{} {}", emoji(config, "⚠️", "[WARN]"), warning);
    }
    out
}

/// Render a load order as a numbered list.
pub fn render_load_order(order: &[String]) -> String {
    let mut out = String::new();
    for (idx, name) in order.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, name);
    }
    out
}
