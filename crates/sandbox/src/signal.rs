// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::validation::ValidationError;
use nix::sys::signal::Signal;
use std::str::FromStr;

/// Resolve a signal given as `TERM`, `SIGTERM`, `term` or `15`.
pub fn parse_signal(name: &str) -> Result<Signal, ValidationError> {
    let unknown = || ValidationError::UnknownSignal { name: name.to_string() };
    let trimmed = name.trim();
    if let Ok(number) = trimmed.parse::<i32>() {
        return Signal::try_from(number).map_err(|_| unknown());
    }
    let upper = trimmed.to_ascii_uppercase();
    let full = if upper.starts_with("SIG") { upper } else { format!("SIG{upper}") };
    Signal::from_str(&full).map_err(|_| unknown())
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
