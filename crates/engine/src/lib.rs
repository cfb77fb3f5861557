// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-engine: job orchestration over the ledger and the sandbox

mod config;
mod error;
mod orchestrator;

pub use config::Config;
pub use error::EngineError;
pub use orchestrator::{JobState, Orchestrator, ReconcileReport};
