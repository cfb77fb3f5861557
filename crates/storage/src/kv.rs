// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value store contract

use crate::StoreError;
use chrono::{DateTime, Utc};

/// A stored value with the time it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Durable mapping from string keys to serialized string values.
///
/// No operation spans more than one key. Concurrent writers to the same key
/// get last-write-wins semantics; there is no compare-and-swap.
pub trait KvStore: Send + Sync {
    /// Fetch the value and last-write time stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError>;

    /// Every key currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Insert `key` or overwrite its value, stamping the current time.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> KvStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        (**self).get(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
