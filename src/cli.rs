//! Shared CLI output helpers for cdscheck binaries.

use std::time::{Duration, Instant};

use colored::Colorize;

use crate::validation::{Severity, ValidationMessage};

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "cdscheck".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

/// Print one validation message, colored by severity.
pub fn message(message: &ValidationMessage) {
    let severity = message.severity.to_string();
    let severity = match message.severity {
        Severity::Error => severity.red().bold(),
        Severity::Warning => severity.yellow().bold(),
        Severity::Info => severity.normal(),
        Severity::Fix => severity.green().bold(),
    };
    let mut line = format!(
        "{severity} {} {}",
        message.key.to_string().bold(),
        message.key.summary()
    );
    if !message.params.is_empty() {
        line.push_str(&format!(" [{}]", message.params.join(", ")));
    }
    if let Some(origin) = &message.origin {
        line.push_str(&format!(" {}", origin.to_string().dimmed()));
    }
    eprintln!("  {line}");
}

/// Format a duration as `HH:MM:SS.t`.
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
}

pub fn print_summary(start: Instant) {
    eprintln!();
    eprintln!(
        "{}  {}",
        "Time".dimmed(),
        format_elapsed(start.elapsed()).bold()
    );
    eprintln!();
}
