// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed ledger.
//!
//! Every operation opens its own connection and drops it before returning,
//! so several processes can share one database file without coordination.

use crate::{Entry, KvStore, StoreError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Table used for job records when none is configured.
pub const DEFAULT_TABLE: &str = "tasks";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A key-value table inside an SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: String,
}

impl SqliteStore {
    /// Open (and on first use, create) `table` in the database at `path`.
    ///
    /// Creating the table is idempotent; an existing table and its rows are
    /// left untouched.
    pub fn open(path: impl Into<PathBuf>, table: impl Into<String>) -> Result<Self, StoreError> {
        let store = Self { path: path.into(), table: table.into() };
        if !is_identifier(&store.table) {
            return Err(StoreError::InvalidTable(store.table));
        }
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = store.connect()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT,
                ts    TEXT
            );",
            store.table
        ))?;
        tracing::debug!(path = %store.path.display(), table = %store.table, "ledger ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("SELECT value, ts FROM {} WHERE key = ?1", self.table),
                params![key],
                |row| Ok((text(key, "value", row.get_ref(0)?), text(key, "ts", row.get_ref(1)?))),
            )
            .optional()?;

        let Some((value, ts)) = row else {
            return Ok(None);
        };
        let value = value?.unwrap_or_default();
        let updated_at = ts.ok().flatten().and_then(|ts| parse_ts(&ts)).unwrap_or_else(|| {
            tracing::warn!(key = %key, "entry has no readable timestamp, using the epoch");
            DateTime::<Utc>::UNIX_EPOCH
        });
        Ok(Some(Entry { value, updated_at }))
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT key FROM {}", self.table))?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        conn.execute(
            &format!(
                "INSERT INTO {} (key, value, ts) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, ts = excluded.ts",
                self.table
            ),
            params![key, value, ts],
        )?;
        Ok(())
    }
}

/// Timestamps are RFC 3339 when written here. Rows from older writers carry a
/// naive `YYYY-MM-DD HH:MM:SS[.ffffff]`, read as UTC.
fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(ts) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc())
}

/// A column as text. SQLite does not enforce declared types, so integers and
/// reals are rendered and blobs are rejected.
fn text(key: &str, column: &str, value: ValueRef<'_>) -> Result<Option<String>, StoreError> {
    let corrupt = |message: String| StoreError::Corrupt { key: key.to_string(), message };
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(n) => Ok(Some(n.to_string())),
        ValueRef::Real(x) => Ok(Some(x.to_string())),
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| corrupt(format!("{column} is not UTF-8: {e}"))),
        ValueRef::Blob(_) => Err(corrupt(format!("{column} is a blob"))),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
