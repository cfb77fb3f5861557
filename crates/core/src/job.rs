// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, record and status state machine.

use crate::clock::Clock;
use crate::location::JobLocation;
use crate::params::JobParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

crate::define_id! {
    /// Unique identifier for a job.
    ///
    /// Generated at submission, never reused. Doubles as the ledger key and
    /// the stem of every artifact file in the job's location.
    pub struct JobId;
}

/// Execution strategy of a job.
///
/// Tags other than `cmd` survive a read/write cycle as [`JobKind::Unknown`]
/// so records written by newer producers are never rewritten lossily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobKind {
    /// External command run through the sandbox
    Cmd,
    /// Unrecognized tag, resolves to [`JobStatus::Invalid`]
    Unknown(String),
}

impl From<String> for JobKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "cmd" => JobKind::Cmd,
            _ => JobKind::Unknown(tag),
        }
    }
}

impl From<JobKind> for String {
    fn from(kind: JobKind) -> Self {
        match kind {
            JobKind::Cmd => "cmd".to_string(),
            JobKind::Unknown(tag) => tag,
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Cmd => f.write_str("cmd"),
            JobKind::Unknown(tag) => f.write_str(tag),
        }
    }
}

/// Lifecycle status of a job as last persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Recorded, no process yet
    Created,
    /// Process spawned, result marker not yet observed
    Running,
    /// Result marker observed with any exit code but 124
    Finished,
    /// Result marker observed with exit code 124
    TimedOut,
    /// Unknown job kind or launch failure
    Invalid,
}

impl JobStatus {
    /// Whether this status is terminal (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::TimedOut | JobStatus::Invalid)
    }

    fn rank(self) -> u8 {
        match self {
            JobStatus::Created => 0,
            JobStatus::Running => 1,
            JobStatus::Finished | JobStatus::TimedOut | JobStatus::Invalid => 2,
        }
    }

    /// Whether moving to `next` is a forward transition.
    ///
    /// Statuses only progress: `created -> running -> terminal`, with any
    /// terminal reachable directly. Terminal statuses never change.
    pub fn can_advance_to(&self, next: JobStatus) -> bool {
        next.rank() > self.rank()
    }
}

crate::simple_display! {
    JobStatus {
        Created => "created",
        Running => "running",
        Finished => "finished",
        TimedOut => "timed_out",
        Invalid => "invalid",
    }
}

/// A job record, the value stored in the ledger under its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub params: JobParams,
    pub location: JobLocation,
    pub status: JobStatus,
    /// Exit code read from the result marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Why the job became invalid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Epoch milliseconds when created
    pub created_at_ms: u64,
    /// Epoch milliseconds of the last status change
    pub updated_at_ms: u64,
}

impl Job {
    /// Create a record in `created` status with its location under `tasks_dir`.
    pub fn new(
        id: JobId,
        kind: JobKind,
        params: JobParams,
        tasks_dir: &Path,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.epoch_ms();
        let location = JobLocation::new(tasks_dir, id.as_str());
        Self {
            id,
            kind,
            params,
            location,
            status: JobStatus::Created,
            exit_code: None,
            error: None,
            created_at_ms: now,
            updated_at_ms: now,
        }
    }

    /// Move to `next` if that is a forward transition.
    ///
    /// Returns whether the record changed.
    pub fn advance(&mut self, next: JobStatus, epoch_ms: u64) -> bool {
        if !self.status.can_advance_to(next) {
            return false;
        }
        self.status = next;
        self.updated_at_ms = epoch_ms;
        true
    }

    /// Mark the job invalid with a diagnostic.
    pub fn invalidate(&mut self, error: impl Into<String>, epoch_ms: u64) -> bool {
        if !self.advance(JobStatus::Invalid, epoch_ms) {
            return false;
        }
        self.error = Some(error.into());
        true
    }

    /// Fold a probe observation into the record.
    ///
    /// A `running` observation only means "no marker yet", so it never
    /// promotes a `created` record: only terminal observations move a job.
    pub fn observe(&mut self, observed: JobStatus, exit_code: Option<i32>, epoch_ms: u64) -> bool {
        if !observed.is_terminal() || !self.advance(observed, epoch_ms) {
            return false;
        }
        self.exit_code = exit_code;
        true
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-1",
        }
        set {
            kind: JobKind = JobKind::Cmd,
            params: JobParams = JobParams::new("echo"),
            location: JobLocation = JobLocation::new("/tmp/jd-test/tasks", "job-1"),
            status: JobStatus = JobStatus::Created,
            created_at_ms: u64 = 1_000_000,
            updated_at_ms: u64 = 1_000_000,
        }
        option {
            exit_code: i32 = None,
            error: String = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
