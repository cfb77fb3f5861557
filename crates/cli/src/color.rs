// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use jd_core::JobStatus;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// Jobs still in flight
    pub const ACTIVE: u8 = 179;
    /// Jobs that ended on their own
    pub const DONE: u8 = 108;
    /// Jobs that timed out or never ran
    pub const FAILED: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, then `COLOR=1` forces, then TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Status name colored by how the job is doing.
pub fn status(status: JobStatus) -> String {
    let code = match status {
        JobStatus::Created | JobStatus::Running => codes::ACTIVE,
        JobStatus::Finished => codes::DONE,
        JobStatus::TimedOut | JobStatus::Invalid => codes::FAILED,
    };
    paint(code, &status.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
