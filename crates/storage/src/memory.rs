// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory ledger for tests

use crate::{Entry, KvStore, StoreError};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    entries: HashMap<String, Entry>,
    writes: usize,
    unavailable: bool,
}

/// Shared in-memory [`KvStore`]. Clones see the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls that reached the store.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    fn check(&self, state: &MemoryState) -> Result<(), StoreError> {
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        let state = self.inner.lock();
        self.check(&state)?;
        Ok(state.entries.get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let state = self.inner.lock();
        self.check(&state)?;
        Ok(state.entries.keys().cloned().collect())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        self.check(&state)?;
        state.writes += 1;
        state
            .entries
            .insert(key.to_string(), Entry { value: value.to_string(), updated_at: Utc::now() });
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
