// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd submit`: launch a command job and supervise it until it ends

use anyhow::Result;
use clap::Args;
use jd_core::{JobParams, SystemClock};
use jd_engine::Orchestrator;
use jd_storage::KvStore;
use std::io::Write;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Executable name or path
    pub command: String,

    /// Argument string; single and double quotes group words
    #[arg(long, default_value = "")]
    pub options: String,

    /// Data piped to the command's standard input
    #[arg(long, default_value = "")]
    pub input: String,

    /// Seconds before the soft signal is sent (default: 3600)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Seconds after the soft signal before SIGKILL (default: timeout x 1.1)
    #[arg(long, value_name = "SECS")]
    pub kill: Option<f64>,

    /// Signal sent at the timeout (default: TERM)
    #[arg(long, value_name = "NAME")]
    pub signal: Option<String>,

    /// Directory searched before the inherited PATH
    #[arg(long, value_name = "DIR")]
    pub path: Option<String>,
}

impl SubmitArgs {
    pub fn params(&self) -> JobParams {
        let mut params =
            JobParams::new(&self.command).options(&self.options).input(&self.input);
        params.timeout = self.timeout;
        params.kill = self.kill;
        params.signal = self.signal.clone();
        params.path = self.path.clone();
        params
    }
}

/// Submit the job, print its id, then stay alive until it ends.
///
/// Ctrl-C stops waiting; supervision is torn down on exit, which kills the
/// job's process group and leaves its result marker.
pub async fn handle<S: KvStore>(
    args: SubmitArgs,
    orch: &Orchestrator<S, SystemClock>,
    format: OutputFormat,
) -> Result<()> {
    let params = args.params();
    let id = orch
        .submit(params.clone())
        .await
        .map_err(|e| ExitError::from_engine(e, Some(&params)))?;

    output::emit(&output::format_submitted(&id, format)?);
    std::io::stdout().flush()?;

    tokio::select! {
        _ = orch.drain() => {
            tracing::debug!(job_id = %id, "supervision complete");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!(job_id = %id, "interrupted, stopping job");
        }
    }
    Ok(())
}
