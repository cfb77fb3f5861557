// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading a job's observable state from its artifacts.

use crate::error::SandboxError;
use crate::launch::TIMEOUT_EXIT;
use jd_core::{JobLocation, JobStatus};
use std::io::ErrorKind;
use std::path::Path;

/// What the artifacts of a job say about it right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// `running` until the result marker exists, then `finished` or `timed_out`
    pub status: JobStatus,
    pub exit_code: Option<i32>,
    /// Captured output, present in verbose probes
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Probe the artifacts under `location`.
///
/// Completion is decided by the result marker alone. Its last non-empty line
/// is the exit code; a marker with no code (left by an interrupted
/// supervisor) still counts as finished.
pub fn probe(location: &JobLocation, verbose: bool) -> Result<Probe, SandboxError> {
    let (status, exit_code) = match read_optional(&location.result)? {
        None => (JobStatus::Running, None),
        Some(marker) => {
            let code = parse_marker(&marker);
            let status =
                if code == Some(TIMEOUT_EXIT) { JobStatus::TimedOut } else { JobStatus::Finished };
            (status, code)
        }
    };

    let (stdout, stderr) = if verbose {
        (
            Some(read_optional(&location.stdout)?.unwrap_or_default()),
            Some(read_optional(&location.stderr)?.unwrap_or_default()),
        )
    } else {
        (None, None)
    };

    Ok(Probe { status, exit_code, stdout, stderr })
}

pub(crate) fn parse_marker(text: &str) -> Option<i32> {
    text.lines().map(str::trim).rfind(|line| !line.is_empty())?.parse().ok()
}

fn read_optional(path: &Path) -> Result<Option<String>, SandboxError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SandboxError::io(path)(e)),
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
