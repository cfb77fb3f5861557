// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning a job process group and supervising it to completion.
//!
//! The supervisor enforces the timeout envelope: after `timeout` the group
//! receives the configured signal, after a further `kill` it receives
//! `SIGKILL`. Whatever happens, the result marker is written once the
//! process is gone.

use crate::error::SandboxError;
use crate::plan::LaunchPlan;
use jd_core::{JobId, JobLocation};
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::fs::OpenOptions as StdOpenOptions;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Exit code recorded when the soft signal ended the job.
pub const TIMEOUT_EXIT: i32 = 124;

/// Exit codes for signal deaths are offset by this value.
const SIGNAL_EXIT_BASE: i32 = 128;

/// A spawned job process awaiting supervision.
pub(crate) struct Spawned {
    pub pid: u32,
    child: Child,
    envelope: Envelope,
    guard: MarkerGuard,
}

#[derive(Debug, Clone, Copy)]
struct Envelope {
    timeout: Duration,
    kill: Duration,
    signal: Signal,
}

/// Create the job's artifacts and spawn its process group.
///
/// A failed spawn removes everything it created except the input file.
pub(crate) async fn spawn(
    id: &JobId,
    location: &JobLocation,
    plan: &LaunchPlan,
) -> Result<Spawned, SandboxError> {
    fs::create_dir_all(&location.dir).await.map_err(SandboxError::io(&location.dir))?;
    write_new(&location.stdin, plan.params.input.as_bytes(), 0o644).await?;

    let mut output = OpenOptions::new();
    output.write(true).create(true).truncate(true);
    let stdin = open_std(&location.stdin, OpenOptions::new().read(true)).await?;
    let stdout = open_std(&location.stdout, &output).await?;
    let stderr = open_std(&location.stderr, &output).await?;
    let record = serde_json::to_vec_pretty(&plan.record())
        .map_err(|e| SandboxError::io(&location.launch)(e.into()))?;
    write_new(&location.launch, &record, 0o600).await?;

    let mut cmd = Command::new(&plan.program);
    cmd.args(&plan.args)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .process_group(0);
    let inherited = std::env::var_os("PATH");
    if let Some(path) = plan.search_path(inherited.as_deref()) {
        cmd.env("PATH", path);
    }

    let launch_error = |source| SandboxError::Launch { command: plan.program.clone(), source };
    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            let created =
                [location.launch.as_path(), location.stdout.as_path(), location.stderr.as_path()];
            discard(id, &created).await;
            return Err(launch_error(e));
        }
    };
    let pid = child
        .id()
        .ok_or_else(|| launch_error(io::Error::other("process exited before supervision")))?;

    tracing::info!(job_id = %id, pid, program = %plan.program, "job launched");
    Ok(Spawned {
        pid,
        child,
        envelope: Envelope { timeout: plan.timeout, kill: plan.kill, signal: plan.signal },
        guard: MarkerGuard::new(id.clone(), location.result.clone(), pid),
    })
}

impl Spawned {
    /// Wait for the process under the timeout envelope, then write the marker.
    pub(crate) async fn supervise(self) {
        let Spawned { pid, mut child, envelope, guard } = self;
        let code = match tokio::time::timeout(envelope.timeout, child.wait()).await {
            Ok(status) => exit_code(&guard.id, status),
            Err(_) => {
                tracing::info!(job_id = %guard.id, pid, signal = %envelope.signal, "timeout reached");
                signal_group(guard.pgid, envelope.signal);
                match tokio::time::timeout(envelope.kill, child.wait()).await {
                    Ok(_) => Some(TIMEOUT_EXIT),
                    Err(_) => {
                        tracing::warn!(job_id = %guard.id, pid, "kill deadline reached, sending SIGKILL");
                        signal_group(guard.pgid, Signal::SIGKILL);
                        if let Err(e) = child.wait().await {
                            tracing::warn!(job_id = %guard.id, error = %e, "wait after SIGKILL failed");
                        }
                        Some(SIGNAL_EXIT_BASE + Signal::SIGKILL as i32)
                    }
                }
            }
        };
        guard.complete(code);
    }
}

fn exit_code(id: &JobId, status: io::Result<ExitStatus>) -> Option<i32> {
    match status {
        Ok(status) => status.code().or_else(|| status.signal().map(|n| SIGNAL_EXIT_BASE + n)),
        Err(e) => {
            tracing::warn!(job_id = %id, error = %e, "failed to wait for job process");
            None
        }
    }
}

fn signal_group(pgid: Pid, signal: Signal) {
    // ESRCH means the group is already gone
    if let Err(e) = killpg(pgid, signal) {
        tracing::debug!(pgid = pgid.as_raw(), %signal, error = %e, "killpg failed");
    }
}

async fn write_new(path: &Path, contents: &[u8], mode: u32) -> Result<(), SandboxError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(mode)
        .open(path)
        .await
        .map_err(SandboxError::io(path))?;
    file.write_all(contents).await.map_err(SandboxError::io(path))?;
    file.flush().await.map_err(SandboxError::io(path))
}

async fn open_std(path: &Path, options: &OpenOptions) -> Result<std::fs::File, SandboxError> {
    let file = options.open(path).await.map_err(SandboxError::io(path))?;
    Ok(file.into_std().await)
}

async fn discard(id: &JobId, paths: &[&Path]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path).await {
            tracing::debug!(job_id = %id, path = %path.display(), error = %e, "failed to remove artifact");
        }
    }
}

/// Owns the result marker of a supervised job.
///
/// Completing the guard writes the exit code. Dropping it uncompleted (task
/// aborted, runtime shut down) kills the process group and leaves an empty
/// marker so the job still resolves to `finished`.
struct MarkerGuard {
    id: JobId,
    path: PathBuf,
    pgid: Pid,
    armed: bool,
}

impl MarkerGuard {
    fn new(id: JobId, path: PathBuf, pid: u32) -> Self {
        let pgid = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
        Self { id, path, pgid, armed: true }
    }

    fn complete(mut self, code: Option<i32>) {
        self.armed = false;
        match write_marker(&self.path, code) {
            Ok(()) => tracing::info!(job_id = %self.id, exit_code = ?code, "job ended"),
            Err(e) => tracing::error!(job_id = %self.id, error = %e, "failed to write result marker"),
        }
    }
}

impl Drop for MarkerGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(job_id = %self.id, "supervision interrupted, killing process group");
        signal_group(self.pgid, Signal::SIGKILL);
        let touched = StdOpenOptions::new().create(true).append(true).open(&self.path);
        if let Err(e) = touched {
            tracing::error!(job_id = %self.id, error = %e, "failed to touch result marker");
        }
    }
}

/// Write `code` to the marker atomically so probes never see a partial line.
///
/// Blocking, as the drop path of [`MarkerGuard`] shares this file and cannot
/// await.
fn write_marker(path: &Path, code: Option<i32>) -> io::Result<()> {
    let tmp = path.with_extension("result.tmp");
    let contents = code.map(|c| format!("{c}\n")).unwrap_or_default();
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
