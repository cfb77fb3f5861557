// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-sandbox: validated, supervised execution of command jobs
//!
//! A job runs as its own process group with stdin, stdout and stderr bound
//! to files in its directory. Completion is observable only through the
//! `<id>.result` marker, which the supervisor writes when the process ends.

mod args;
mod error;
mod launch;
mod plan;
mod probe;
mod sandbox;
mod signal;
mod span;
mod validation;

pub use args::split_words;
pub use error::SandboxError;
pub use launch::TIMEOUT_EXIT;
pub use plan::{LaunchPlan, LaunchRecord};
pub use probe::Probe;
pub use sandbox::{Sandbox, SETTLE_DELAY};
pub use signal::parse_signal;
pub use span::Span;
pub use validation::{Field, ValidationError};
