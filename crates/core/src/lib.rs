// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-core: job records shared by the sandbox, ledger and orchestrator

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod location;
pub mod params;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobId, JobKind, JobStatus};
pub use location::JobLocation;
pub use params::{JobParams, DEFAULT_SIGNAL, DEFAULT_TIMEOUT_SECS, KILL_GRACE_FACTOR};
