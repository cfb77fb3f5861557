// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd status`: one job's refreshed state, or the running ids

use anyhow::Result;
use clap::Args;
use jd_core::{JobId, SystemClock};
use jd_engine::Orchestrator;
use jd_storage::KvStore;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Job id; omit to list jobs recorded as running
    pub id: Option<String>,

    /// Include captured output and the full record
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn handle<S: KvStore>(
    args: StatusArgs,
    orch: &Orchestrator<S, SystemClock>,
    format: OutputFormat,
) -> Result<()> {
    let text = match args.id {
        Some(id) => {
            let state = orch
                .status(&JobId::from(id), args.verbose)
                .map_err(|e| ExitError::from_engine(e, None))?;
            output::format_state(&state, format)?
        }
        None => {
            let ids = orch.running().map_err(|e| ExitError::from_engine(e, None))?;
            output::format_running(&ids, format)?
        }
    };
    output::emit(&text);
    Ok(())
}
