// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated launch parameters and the launch record written beside a job.

use crate::args::split_words;
use crate::signal::parse_signal;
use crate::validation::{check_duration, check_text, Field, ValidationError};
use jd_core::JobParams;
use nix::sys::signal::Signal;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::time::Duration;

/// Everything needed to spawn a job, derived from its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    /// Parameters with every default filled in, as persisted in the record
    pub params: JobParams,
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
    /// Grace period between the soft signal and `SIGKILL`
    pub kill: Duration,
    pub signal: Signal,
}

impl LaunchPlan {
    /// Validate `params` and resolve them into a plan.
    ///
    /// Checks run in order: allow-lists, quoting, durations, signal. The first
    /// failure is returned.
    pub fn new(params: &JobParams) -> Result<Self, ValidationError> {
        check_text(params)?;
        let mut params = params.clone();
        params.fill_defaults();

        let mut words = params.command.split_whitespace().map(String::from);
        let program = words.next().ok_or(ValidationError::EmptyCommand)?;
        let mut args: Vec<String> = words.collect();
        args.extend(split_words(&params.options)?);

        let timeout = check_duration(Field::Timeout, params.timeout_secs())?;
        let kill = check_duration(Field::Kill, params.kill_secs())?;
        let signal = parse_signal(params.signal_name())?;

        Ok(Self { params, program, args, timeout, kill, signal })
    }

    /// `PATH` for the child: the extra directory ahead of `inherited`.
    pub fn search_path(&self, inherited: Option<&OsStr>) -> Option<OsString> {
        let extra = self.params.path.as_deref().filter(|p| !p.is_empty())?;
        let mut path = OsString::from(extra);
        if let Some(current) = inherited.filter(|p| !p.is_empty()) {
            path.push(":");
            path.push(current);
        }
        Some(path)
    }

    pub fn record(&self) -> LaunchRecord {
        LaunchRecord {
            program: self.program.clone(),
            args: self.args.clone(),
            path: self.params.path.clone(),
            timeout: self.timeout.as_secs_f64(),
            kill: self.kill.as_secs_f64(),
            signal: self.signal.as_str().to_string(),
        }
    }
}

/// Contents of the `<id>.cmd` artifact describing what was spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub program: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub timeout: f64,
    pub kill: f64,
    pub signal: String,
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
