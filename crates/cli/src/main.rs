// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd: run external commands as supervised background jobs and track them

mod color;
mod commands;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jd_engine::{Config, Orchestrator};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use commands::{reconcile, status, submit};
use exit_error::{ExitError, EXIT_FAILURE};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "jd",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Run external commands as supervised jobs and track their status",
    styles = color::styles(),
)]
struct Cli {
    /// State directory holding the ledger and job artifacts (overrides JD_STATE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a command job, print its id and wait for it to end
    Submit(submit::SubmitArgs),
    /// Show a job's status, or list running jobs
    Status(status::StatusArgs),
    /// Refresh every running job from its result marker
    Reconcile(reconcile::ReconcileArgs),
}

/// Log to stderr, filtered by `JD_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("JD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(state_dir: Option<&Path>) -> Result<Config, ExitError> {
    let resolved = match state_dir {
        Some(dir) => {
            let dir = dir.display().to_string();
            Config::from_lookup(
                |key| if key == "JD_STATE_DIR" { Some(dir.clone()) } else { std::env::var(key).ok() },
                None,
            )
        }
        None => Config::from_env(),
    };
    resolved.map_err(|e| ExitError::from_engine(e, None))
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.state_dir.as_deref())?;
    tracing::debug!(?config, "configuration resolved");
    let orch = Orchestrator::from_config(&config).map_err(|e| ExitError::from_engine(e, None))?;

    match cli.command {
        Commands::Submit(args) => submit::handle(args, &orch, cli.output).await,
        Commands::Status(args) => status::handle(args, &orch, cli.output),
        Commands::Reconcile(args) => reconcile::handle(args, &orch, cli.output).await,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("{exit}");
                exit.code
            }
            None => {
                eprintln!("error: {err:#}");
                EXIT_FAILURE
            }
        };
        std::process::exit(code);
    }
}
