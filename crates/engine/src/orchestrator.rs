// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job orchestration: submission, status refresh and reconciliation.
//!
//! The ledger holds one JSON record per job, keyed by id. Status is only as
//! fresh as the last refresh: every read re-probes the job's artifacts and
//! writes the record back when, and only when, it changed.

use crate::{Config, EngineError};
use jd_core::{Clock, Job, JobId, JobKind, JobParams, JobStatus, SystemClock};
use jd_sandbox::{Probe, Sandbox};
use jd_storage::{KvStore, SqliteStore, StoreError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Observed state of one job, as returned by [`Orchestrator::status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobState {
    pub id: JobId,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Full record, included in verbose queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

/// Outcome of one reconciliation sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Jobs that were `running` when the sweep started
    pub checked: usize,
    pub finished: usize,
    pub timed_out: usize,
    pub invalid: usize,
    /// Jobs whose artifacts could not be read
    pub errors: usize,
}

impl ReconcileReport {
    /// Number of records the sweep rewrote.
    pub fn changed(&self) -> usize {
        self.finished + self.timed_out + self.invalid
    }
}

/// Coordinates the ledger and the sandbox.
pub struct Orchestrator<S: KvStore, C: Clock = SystemClock> {
    ledger: S,
    sandbox: Sandbox,
    tasks_dir: PathBuf,
    clock: C,
}

impl Orchestrator<SqliteStore, SystemClock> {
    /// Open the configured SQLite ledger with the system clock.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let ledger = SqliteStore::open(&config.db_path, &config.table)?;
        Ok(Self::new(ledger, Sandbox::new(config.settle), &config.tasks_dir, SystemClock))
    }
}

impl<S: KvStore, C: Clock> Orchestrator<S, C> {
    pub fn new(ledger: S, sandbox: Sandbox, tasks_dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { ledger, sandbox, tasks_dir: tasks_dir.into(), clock }
    }

    pub fn ledger(&self) -> &S {
        &self.ledger
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    /// Validate, record and launch a command job.
    ///
    /// Invalid parameters fail before anything is written. A launch failure
    /// leaves the record `invalid` with the error attached.
    pub async fn submit(&self, params: JobParams) -> Result<JobId, EngineError> {
        self.submit_as(JobKind::Cmd, params).await
    }

    /// Submit a job of an explicit kind.
    ///
    /// Kinds without an executor are recorded as `invalid` and rejected with
    /// [`EngineError::UnknownKind`].
    pub async fn submit_as(&self, kind: JobKind, params: JobParams) -> Result<JobId, EngineError> {
        let JobKind::Cmd = kind else {
            let id = self.fresh_id()?;
            let mut job = Job::new(id.clone(), kind, params, &self.tasks_dir, &self.clock);
            job.invalidate(unknown_kind(&job.kind), self.clock.epoch_ms());
            self.persist(&job)?;
            tracing::warn!(job_id = %id, kind = %job.kind, "rejected job with unknown kind");
            return Err(EngineError::UnknownKind { id, kind: job.kind });
        };

        let plan = self.sandbox.prepare(&params)?;
        let id = self.fresh_id()?;
        let mut job = Job::new(id.clone(), kind, plan.params.clone(), &self.tasks_dir, &self.clock);
        self.persist(&job)?;

        match self.sandbox.launch(&job, &plan).await {
            Ok(pid) => {
                job.advance(JobStatus::Running, self.clock.epoch_ms());
                self.persist(&job)?;
                tracing::info!(job_id = %id, pid, "job submitted");
                Ok(id)
            }
            Err(source) => {
                tracing::error!(job_id = %id, error = %source, "job launch failed");
                job.invalidate(source.to_string(), self.clock.epoch_ms());
                self.persist(&job)?;
                Err(EngineError::Launch { id, source })
            }
        }
    }

    /// Refresh and return the state of one job.
    ///
    /// Verbose queries include captured output and the full record.
    pub fn status(&self, id: &JobId, verbose: bool) -> Result<JobState, EngineError> {
        let mut job = self.load(id.as_str())?.ok_or_else(|| EngineError::NotFound(id.clone()))?;
        let probe = self.refresh(&mut job, verbose)?;
        let (stdout, stderr) = match probe {
            Some(Probe { stdout, stderr, .. }) => (stdout, stderr),
            None if verbose => (Some(String::new()), Some(String::new())),
            None => (None, None),
        };
        Ok(JobState {
            id: job.id.clone(),
            status: job.status,
            exit_code: job.exit_code,
            stdout,
            stderr,
            job: verbose.then_some(job),
        })
    }

    /// Ids whose last persisted status is `running`. Reads the ledger only.
    pub fn running(&self) -> Result<Vec<JobId>, EngineError> {
        Ok(self
            .jobs()?
            .into_iter()
            .filter(|job| job.status == JobStatus::Running)
            .map(|job| job.id)
            .collect())
    }

    /// Every decodable record, oldest first.
    ///
    /// Entries that cannot be read or decoded are logged and skipped.
    pub fn jobs(&self) -> Result<Vec<Job>, EngineError> {
        let mut jobs = Vec::new();
        for key in self.ledger.keys()? {
            match self.load(&key) {
                Ok(Some(job)) => jobs.push(job),
                Ok(None) => {}
                Err(EngineError::Corrupt { key, source }) => {
                    tracing::warn!(key = %key, error = %source, "skipping undecodable ledger entry");
                }
                Err(EngineError::Storage(e @ StoreError::Corrupt { .. })) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable ledger entry");
                }
                Err(e) => return Err(e),
            }
        }
        jobs.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }

    /// Re-probe every `running` job and persist the ones that changed.
    ///
    /// A job whose artifacts cannot be read is counted in `errors` and left
    /// for the next sweep; a ledger failure aborts the sweep.
    pub fn reconcile(&self) -> Result<ReconcileReport, EngineError> {
        let mut report = ReconcileReport::default();
        for mut job in self.jobs()?.into_iter().filter(|job| job.status == JobStatus::Running) {
            report.checked += 1;
            match self.refresh(&mut job, false) {
                Ok(_) => match job.status {
                    JobStatus::Finished => report.finished += 1,
                    JobStatus::TimedOut => report.timed_out += 1,
                    JobStatus::Invalid => report.invalid += 1,
                    JobStatus::Created | JobStatus::Running => {}
                },
                Err(e @ EngineError::Probe { .. }) => {
                    tracing::warn!(job_id = %job.id, error = %e, "probe failed during reconcile");
                    report.errors += 1;
                }
                Err(e) => return Err(e),
            }
        }
        if report.changed() > 0 || report.errors > 0 {
            tracing::info!(
                checked = report.checked,
                finished = report.finished,
                timed_out = report.timed_out,
                invalid = report.invalid,
                errors = report.errors,
                "reconciled"
            );
        }
        Ok(report)
    }

    /// Wait until every job launched through this orchestrator has ended.
    pub async fn drain(&self) {
        self.sandbox.wait_all().await;
    }

    /// Fold the job's current artifacts into `job`, persisting on change.
    fn refresh(&self, job: &mut Job, verbose: bool) -> Result<Option<Probe>, EngineError> {
        let now = self.clock.epoch_ms();
        let (changed, probe) = match job.kind {
            JobKind::Cmd => {
                let probe = self
                    .sandbox
                    .probe(job, verbose)
                    .map_err(|source| EngineError::Probe { id: job.id.clone(), source })?;
                (job.observe(probe.status, probe.exit_code, now), Some(probe))
            }
            JobKind::Unknown(_) => (job.invalidate(unknown_kind(&job.kind), now), None),
        };
        if changed {
            self.persist(job)?;
            tracing::info!(job_id = %job.id, status = %job.status, exit_code = ?job.exit_code, "job status changed");
        }
        Ok(probe)
    }

    fn fresh_id(&self) -> Result<JobId, EngineError> {
        loop {
            let id = JobId::new();
            if self.ledger.get(id.as_str())?.is_none() {
                return Ok(id);
            }
            tracing::warn!(job_id = %id, "generated id already in use, retrying");
        }
    }

    fn load(&self, key: &str) -> Result<Option<Job>, EngineError> {
        let Some(entry) = self.ledger.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&entry.value)
            .map(Some)
            .map_err(|source| EngineError::Corrupt { key: key.to_string(), source })
    }

    fn persist(&self, job: &Job) -> Result<(), EngineError> {
        let value = serde_json::to_string(job)
            .map_err(|source| EngineError::Corrupt { key: job.id.to_string(), source })?;
        self.ledger.set(job.id.as_str(), &value)?;
        tracing::debug!(job_id = %job.id, status = %job.status, "record persisted");
        Ok(())
    }
}

fn unknown_kind(kind: &JobKind) -> String {
    format!("unknown job kind `{kind}`")
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
