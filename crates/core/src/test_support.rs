// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobKind, JobLocation, JobParams, JobStatus};
use std::path::Path;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job records.
pub mod strategies {
    use crate::{Job, JobId, JobKind, JobLocation, JobParams, JobStatus};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Created),
            Just(JobStatus::Running),
            Just(JobStatus::Finished),
            Just(JobStatus::TimedOut),
            Just(JobStatus::Invalid),
        ]
    }

    pub fn arb_kind() -> impl Strategy<Value = JobKind> {
        prop_oneof![Just(JobKind::Cmd), "[a-z]{1,8}".prop_map(JobKind::from)]
    }

    /// Seconds with an exact binary and short decimal representation.
    fn arb_secs() -> impl Strategy<Value = f64> {
        (0u32..400_000).prop_map(|quarters| f64::from(quarters) * 0.25)
    }

    pub fn arb_params() -> impl Strategy<Value = JobParams> {
        (
            "[a-z/._]{1,16}",
            "[a-zA-Z0-9 '\"._-]{0,24}",
            any::<String>(),
            proptest::option::of(arb_secs()),
            proptest::option::of(arb_secs()),
            proptest::option::of("(TERM|INT|HUP|KILL)"),
            proptest::option::of("/[a-z]{1,8}"),
        )
            .prop_map(|(command, options, input, timeout, kill, signal, path)| JobParams {
                command,
                options,
                input,
                timeout,
                kill,
                signal,
                path,
            })
    }

    pub fn arb_job() -> impl Strategy<Value = Job> {
        (
            arb_kind(),
            arb_params(),
            arb_status(),
            proptest::option::of(any::<i32>()),
            proptest::option::of(".{0,32}"),
            any::<u64>(),
            any::<u64>(),
        )
            .prop_map(|(kind, params, status, exit_code, error, created, updated)| {
                let id = JobId::new();
                Job {
                    location: JobLocation::new("/tmp/jd/tasks", id.as_str()),
                    id,
                    kind,
                    params,
                    status,
                    exit_code,
                    error,
                    created_at_ms: created,
                    updated_at_ms: updated,
                }
            })
    }
}

// ── Record factories ────────────────────────────────────────────────────

/// A `cmd` record in `status` whose artifacts live under `tasks_dir`.
pub fn cmd_job(id: &str, status: JobStatus, tasks_dir: &Path) -> Job {
    Job::builder()
        .id(id)
        .kind(JobKind::Cmd)
        .params(JobParams::new("true"))
        .location(JobLocation::new(tasks_dir, id))
        .status(status)
        .build()
}

/// A record whose kind no executor recognizes.
pub fn unknown_kind_job(id: &str, tag: &str, tasks_dir: &Path) -> Job {
    Job::builder()
        .id(id)
        .kind(JobKind::Unknown(tag.to_string()))
        .location(JobLocation::new(tasks_dir, id))
        .status(JobStatus::Running)
        .build()
}
