// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job artifact directory and the files inside it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filesystem artifacts owned by one job.
///
/// Computed once at submission from the tasks directory and the job id, then
/// persisted with the record so later probes never recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLocation {
    /// `<tasks_dir>/<id>`
    pub dir: PathBuf,
    /// Captured standard input, written before spawn
    pub stdin: PathBuf,
    /// Captured standard output
    pub stdout: PathBuf,
    /// Captured standard error
    pub stderr: PathBuf,
    /// Result marker; its existence means the process has terminated
    pub result: PathBuf,
    /// Launch record describing the spawned invocation
    pub launch: PathBuf,
}

impl JobLocation {
    pub fn new(tasks_dir: impl AsRef<Path>, id: &str) -> Self {
        let dir = tasks_dir.as_ref().join(id);
        let artifact = |ext: &str| dir.join(format!("{id}.{ext}"));
        Self {
            stdin: artifact("stdin"),
            stdout: artifact("stdout"),
            stderr: artifact("stderr"),
            result: artifact("result"),
            launch: artifact("cmd"),
            dir,
        }
    }
}

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
