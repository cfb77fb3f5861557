// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-storage: durable key-value ledger for job records

mod error;
mod kv;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod sqlite;

pub use error::StoreError;
pub use kv::{Entry, KvStore};
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, DEFAULT_TABLE};
