// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-driven configuration.
//!
//! | variable         | default                     |
//! |------------------|-----------------------------|
//! | `JD_STATE_DIR`   | `$XDG_STATE_HOME/jd`, then `~/.local/state/jd` |
//! | `JD_DB`          | `<state>/jd.db`             |
//! | `JD_TABLE`       | `tasks`                     |
//! | `JD_TASKS_DIR`   | `<state>/tasks`             |
//! | `JD_SETTLE_MS`   | `500`                       |

use crate::EngineError;
use jd_sandbox::SETTLE_DELAY;
use jd_storage::DEFAULT_TABLE;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database holding the ledger
    pub db_path: PathBuf,
    /// Ledger table name
    pub table: String,
    /// Parent directory of every job directory
    pub tasks_dir: PathBuf,
    /// Pause after each spawn before `submit` returns
    pub settle: Duration,
}

impl Config {
    /// Defaults rooted at `state_dir`.
    pub fn with_state_dir(state_dir: impl AsRef<Path>) -> Self {
        let state_dir = state_dir.as_ref();
        Self {
            db_path: state_dir.join("jd.db"),
            table: DEFAULT_TABLE.to_string(),
            tasks_dir: state_dir.join("tasks"),
            settle: SETTLE_DELAY,
        }
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Resolve from `lookup` (variable name to value) and the home directory.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, EngineError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let state_dir = match (var("JD_STATE_DIR"), var("XDG_STATE_HOME"), home) {
            (Some(dir), _, _) => PathBuf::from(dir),
            (None, Some(xdg), _) => PathBuf::from(xdg).join("jd"),
            (None, None, Some(home)) => home.join(".local/state/jd"),
            (None, None, None) => return Err(EngineError::NoStateDir),
        };

        let mut config = Self::with_state_dir(&state_dir);
        if let Some(db) = var("JD_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Some(table) = var("JD_TABLE") {
            config.table = table;
        }
        if let Some(tasks) = var("JD_TASKS_DIR") {
            config.tasks_dir = PathBuf::from(tasks);
        }
        match var("JD_SETTLE_MS").map(|ms| ms.parse::<u64>()) {
            Some(Ok(ms)) => config.settle = Duration::from_millis(ms),
            Some(Err(e)) => tracing::warn!(error = %e, "ignoring invalid JD_SETTLE_MS"),
            None => {}
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
