//! Terminal output for CLI handlers.
//!
//! Human-readable output uses colored symbols and tables. In JSON mode every
//! command prints one JSON document on stdout instead, and progress bars are
//! hidden.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

/// Output settings from the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit one machine-readable JSON document instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Force colors on or off; `None` detects from the terminal.
pub fn set_color(enabled: Option<bool>) {
    match enabled {
        Some(enabled) => owo_colors::set_override(enabled),
        None => owo_colors::unset_override(),
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Text output is off in JSON mode and in quiet mode.
fn text_suppressed() -> bool {
    let config = read_config();
    config.json || config.quiet
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if text_suppressed() {
        return;
    }
    println!(
        "{} {}",
        "ror".if_supports_color(Stream::Stdout, |t| t.bold()),
        version.if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
}

/// Print a section header.
pub fn section(title: &str) {
    if text_suppressed() {
        return;
    }
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if text_suppressed() {
        return;
    }
    println!(
        "  {:<16} {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    if text_suppressed() {
        return;
    }
    println!("  {} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
}

/// Print an error line on stderr. Shown in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            serde_json::json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }
    eprintln!("  {} {}", "×".if_supports_color(Stream::Stderr, |t| t.red()), message);
}

/// Print a multi-line block, indented.
pub fn lines(content: &str) {
    if text_suppressed() {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Highlight a value in cyan.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.if_supports_color(Stream::Stdout, |t| t.cyan()))
}

/// Print a typed JSON envelope on stdout.
pub fn emit_json(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        serde_json::json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Progress bar over `total` units; hidden in JSON or quiet mode.
pub fn progress_bar(total: u64) -> indicatif::ProgressBar {
    if text_suppressed() {
        return indicatif::ProgressBar::hidden();
    }
    let pb = indicatif::ProgressBar::new(total);
    if let Ok(style) =
        indicatif::ProgressStyle::default_bar().template("  {bar:32.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format a score with `precision` decimals.
pub fn score(value: f64, precision: u32) -> String {
    format!("{value:.*}", precision as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rounding() {
        assert_eq!(score(1.23456, 3), "1.235");
        assert_eq!(score(2.0, 0), "2");
    }
}
