// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::SandboxError;
use crate::launch;
use crate::plan::LaunchPlan;
use crate::probe::{self, Probe};
use crate::validation::ValidationError;
use jd_core::{Job, JobParams};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Pause after spawning so near-instant failures land before `launch` returns.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Launches command jobs and reads back their outcome.
///
/// Supervisors run as tasks on the current tokio runtime. Clones share the
/// same set of supervisors.
#[derive(Clone)]
pub struct Sandbox {
    settle: Duration,
    supervisors: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SETTLE_DELAY)
    }
}

impl Sandbox {
    pub fn new(settle: Duration) -> Self {
        Self { settle, supervisors: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Validate `params` and resolve defaults. Touches nothing on disk.
    pub fn prepare(&self, params: &JobParams) -> Result<LaunchPlan, ValidationError> {
        LaunchPlan::new(params)
    }

    /// Create the artifacts of `job`, spawn it under supervision and return
    /// its OS pid once the settle delay has passed.
    pub async fn launch(&self, job: &Job, plan: &LaunchPlan) -> Result<u32, SandboxError> {
        let spawned = launch::spawn(&job.id, &job.location, plan).await?;
        let pid = spawned.pid;
        let handle = tokio::spawn(spawned.supervise());
        {
            let mut supervisors = self.supervisors.lock();
            supervisors.retain(|h| !h.is_finished());
            supervisors.push(handle);
        }
        tokio::time::sleep(self.settle).await;
        Ok(pid)
    }

    pub fn probe(&self, job: &Job, verbose: bool) -> Result<Probe, SandboxError> {
        probe::probe(&job.location, verbose)
    }

    /// Number of supervisors still running.
    pub fn active(&self) -> usize {
        self.supervisors.lock().iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait until every supervised process has ended and its marker is written.
    pub async fn wait_all(&self) {
        loop {
            let handles = std::mem::take(&mut *self.supervisors.lock());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "supervisor task failed");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
