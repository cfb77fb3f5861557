// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied parameters of a command job.

use serde::{Deserialize, Serialize};

/// Soft deadline applied when the caller gives none (one hour).
pub const DEFAULT_TIMEOUT_SECS: f64 = 3600.0;

/// Hard deadline factor: `kill` defaults to `timeout * KILL_GRACE_FACTOR`.
pub const KILL_GRACE_FACTOR: f64 = 1.1;

/// Signal delivered at the soft deadline when the caller gives none.
pub const DEFAULT_SIGNAL: &str = "TERM";

/// Parameters of a shell-command job, persisted verbatim in the job record.
///
/// Optional fields stay `None` until [`JobParams::fill_defaults`] runs during
/// validation; the record persisted at submission carries the filled values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    /// Executable path or name
    pub command: String,
    /// Argument string, split into argv words at launch
    #[serde(default)]
    pub options: String,
    /// Data piped to standard input
    #[serde(default)]
    pub input: String,
    /// Soft deadline in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    /// Additional seconds after the soft deadline before `SIGKILL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kill: Option<f64>,
    /// Signal name sent at the soft deadline (`TERM`, `SIGINT`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    /// Extra directory prepended to the child's `PATH`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JobParams {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            options: String::new(),
            input: String::new(),
            timeout: None,
            kill: None,
            signal: None,
            path: None,
        }
    }

    crate::setters! {
        into {
            options: String,
            input: String,
        }
        option {
            timeout: f64,
            kill: f64,
            signal: String,
            path: String,
        }
    }

    /// Fill in every optional field the caller left out.
    ///
    /// `kill` is derived from the (possibly caller-supplied) `timeout`; an
    /// explicit `kill` is kept even when it is shorter than `timeout`.
    pub fn fill_defaults(&mut self) {
        let timeout = *self.timeout.get_or_insert(DEFAULT_TIMEOUT_SECS);
        self.kill.get_or_insert(timeout * KILL_GRACE_FACTOR);
        self.signal.get_or_insert_with(|| DEFAULT_SIGNAL.to_string());
    }

    /// Soft deadline in seconds, falling back to the default.
    pub fn timeout_secs(&self) -> f64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Hard deadline in seconds, falling back to `timeout * 1.1`.
    pub fn kill_secs(&self) -> f64 {
        self.kill.unwrap_or(self.timeout_secs() * KILL_GRACE_FACTOR)
    }

    pub fn signal_name(&self) -> &str {
        self.signal.as_deref().unwrap_or(DEFAULT_SIGNAL)
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
