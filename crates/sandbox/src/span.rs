// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte spans into caller-supplied text and caret diagnostics over them.

use serde::{Deserialize, Serialize};

/// A byte-offset range in a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// The span covering the single character `ch` found at byte `pos`.
    #[inline]
    pub fn of_char(pos: usize, ch: char) -> Self {
        Self { start: pos, end: pos + ch.len_utf8() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the spanned text, or "" when the span does not fall on
    /// character boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Character column (0-indexed) of the span start and the line holding it.
pub fn locate(source: &str, span: Span) -> (usize, &str) {
    let start = span.start.min(source.len());
    let head = source.get(..start).unwrap_or(source);
    let line_start = head.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[line_start..].find('\n').map(|i| line_start + i).unwrap_or(source.len());
    let col = head.get(line_start..).map(|s| s.chars().count()).unwrap_or(0);
    (col, &source[line_start..line_end])
}

/// Render `message` with the offending value and a caret under the span.
///
/// ```text
/// error: command contains disallowed character ';' at position 4
///   --> command, column 5
///    |
///    | echo;rm
///    |     ^
/// ```
pub fn diagnostic_context(source: &str, label: &str, span: Span, message: &str) -> String {
    let (col, line) = locate(source, span);
    let width = span.slice(source).chars().count().max(1);
    format!(
        "error: {message}\n  --> {label}, column {}\n   |\n   | {line}\n   | {}{}",
        col + 1,
        " ".repeat(col),
        "^".repeat(width)
    )
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
