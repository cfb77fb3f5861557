// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rejection of job parameters before any artifact or process exists.

use crate::span::{diagnostic_context, Span};
use jd_core::JobParams;
use thiserror::Error;

/// Parameter a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Command,
    Options,
    Timeout,
    Kill,
    Signal,
}

jd_core::simple_display! {
    Field {
        Command => "command",
        Options => "options",
        Timeout => "timeout",
        Kill => "kill",
        Signal => "signal",
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("command is empty")]
    EmptyCommand,

    /// `position` counts characters; `span` is in bytes.
    #[error("{field} contains disallowed character {ch:?} at position {position}")]
    InvalidChar { field: Field, ch: char, position: usize, span: Span },

    #[error("unterminated {quote} quote in options at position {}", .span.start)]
    UnterminatedQuote { quote: char, span: Span },

    #[error("{field} must be a finite, non-negative number of seconds (got {value})")]
    InvalidDuration { field: Field, value: f64 },

    #[error("unknown signal `{name}`")]
    UnknownSignal { name: String },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyCommand => Field::Command,
            Self::InvalidChar { field, .. } | Self::InvalidDuration { field, .. } => *field,
            Self::UnterminatedQuote { .. } => Field::Options,
            Self::UnknownSignal { .. } => Field::Signal,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidChar { span, .. } | Self::UnterminatedQuote { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// Render the error against the offending parameter value, with a caret
    /// under the rejected position when there is one.
    pub fn diagnostic(&self, params: &JobParams) -> String {
        let source = match self.field() {
            Field::Command => params.command.as_str(),
            Field::Options => params.options.as_str(),
            _ => return format!("error: {self}"),
        };
        match self.span() {
            Some(span) => diagnostic_context(source, &self.field().to_string(), span, &self.to_string()),
            None => format!("error: {self}"),
        }
    }
}

fn allowed_in_command(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '\t' | ' ' | '/' | '.' | ',')
}

fn allowed_in_options(ch: char) -> bool {
    allowed_in_command(ch) || matches!(ch, '\'' | '"')
}

/// Reject `text` at its first character outside the field's allow-list.
fn check_chars(field: Field, text: &str, allowed: fn(char) -> bool) -> Result<(), ValidationError> {
    match text.char_indices().enumerate().find(|(_, (_, ch))| !allowed(*ch)) {
        Some((position, (offset, ch))) => {
            Err(ValidationError::InvalidChar { field, ch, position, span: Span::of_char(offset, ch) })
        }
        None => Ok(()),
    }
}

/// Check the command and options allow-lists.
///
/// The command permits letters, digits, underscore, space, tab, `/`, `.` and
/// `,`. Options additionally permit single and double quotes.
pub fn check_text(params: &JobParams) -> Result<(), ValidationError> {
    if params.command.trim().is_empty() {
        return Err(ValidationError::EmptyCommand);
    }
    check_chars(Field::Command, &params.command, allowed_in_command)?;
    check_chars(Field::Options, &params.options, allowed_in_options)
}

/// Convert a seconds value into a [`std::time::Duration`].
pub fn check_duration(field: Field, secs: f64) -> Result<std::time::Duration, ValidationError> {
    std::time::Duration::try_from_secs_f64(secs)
        .map_err(|_| ValidationError::InvalidDuration { field, value: secs })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
