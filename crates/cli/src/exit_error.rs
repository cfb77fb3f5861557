// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns process termination.

use jd_core::JobParams;
use jd_engine::EngineError;
use std::fmt;

/// Any failure without a more specific code
pub const EXIT_FAILURE: i32 = 1;
/// Rejected job parameters or command-line values
pub const EXIT_INVALID: i32 = 2;
/// Unknown job id
pub const EXIT_NOT_FOUND: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Map an engine failure to an exit code and a printable message.
    ///
    /// Validation failures render a caret diagnostic against `params` when
    /// the submitted parameters are known.
    pub fn from_engine(err: EngineError, params: Option<&JobParams>) -> Self {
        match (&err, params) {
            (EngineError::Validation(v), Some(params)) => Self::new(EXIT_INVALID, v.diagnostic(params)),
            (EngineError::Validation(_) | EngineError::UnknownKind { .. }, _) => {
                Self::new(EXIT_INVALID, format!("error: {err}"))
            }
            (EngineError::NotFound(_), _) => Self::new(EXIT_NOT_FOUND, format!("error: {err}")),
            _ => Self::new(EXIT_FAILURE, format!("error: {err}")),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
