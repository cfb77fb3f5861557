// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ledger error types

use thiserror::Error;

/// Errors raised by a [`crate::KvStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be opened, read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Table names are interpolated into SQL and must be plain identifiers.
    #[error("invalid table name '{0}'")]
    InvalidTable(String),

    /// A stored row cannot be read as text.
    #[error("corrupt entry '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
