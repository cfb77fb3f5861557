// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd reconcile`: refresh every running job from its artifacts

use anyhow::Result;
use clap::Args;
use jd_core::SystemClock;
use jd_engine::Orchestrator;
use jd_storage::KvStore;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::exit_error::{ExitError, EXIT_INVALID};
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Sweep every SECS seconds until interrupted
    #[arg(long, value_name = "SECS")]
    pub every: Option<f64>,
}

pub async fn handle<S: KvStore>(
    args: ReconcileArgs,
    orch: &Orchestrator<S, SystemClock>,
    format: OutputFormat,
) -> Result<()> {
    let Some(every) = args.every else {
        let report = orch.reconcile().map_err(|e| ExitError::from_engine(e, None))?;
        output::emit(&output::format_report(&report, format)?);
        return Ok(());
    };

    let period = Duration::try_from_secs_f64(every)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| ExitError::new(EXIT_INVALID, format!("error: invalid --every value: {every}")))?;

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => match orch.reconcile() {
                Ok(report) => output::emit(&output::format_report(&report, format)?),
                // A failed sweep does not end the loop
                Err(e) => tracing::error!(error = %e, "reconcile sweep failed"),
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
