// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI output styling.
//!
//! Respects NO_COLOR and FORCE_COLOR. Colors are disabled when piped.

use std::time::Duration;

use colored::{ColoredString, Colorize};

/// Set color support from the environment. Call once at startup.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

pub fn banner_ok(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} OK", phase).green().bold(),
        "===".dimmed()
    )
}

pub fn banner_fail(phase: &str, count: usize) -> String {
    let msg = match count {
        0 => format!("{} FAILED", phase),
        1 => format!("{} FAILED: 1 error", phase),
        n => format!("{} FAILED: {} errors", phase, n),
    };
    format!("{} {} {}", "===".dimmed(), msg.red().bold(), "===".dimmed())
}

pub fn heading(text: &str) -> String {
    format!("{} {} {}", "===".dimmed(), text, "===".dimmed())
}

/// Dimmed stage timing line, shown with `--time`.
pub fn timing(stage: &str, elapsed: Duration) -> ColoredString {
    format!("{} took {:.3}ms", stage, elapsed.as_secs_f64() * 1000.0).dimmed()
}

pub fn title(name: &str) -> ColoredString {
    name.bold()
}

pub fn version(v: &str) -> ColoredString {
    v.dimmed()
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}

pub fn file_path(path: &str) -> ColoredString {
    path.underline()
}
