// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

fn resolve(vars: &[(&str, &str)], home: Option<&str>) -> Result<Config, EngineError> {
    let vars: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config::from_lookup(|key| vars.get(key).cloned(), home.map(PathBuf::from))
}

#[yare::parameterized(
    explicit   = { &[("JD_STATE_DIR", "/srv/jd"), ("XDG_STATE_HOME", "/xdg")], "/srv/jd" },
    xdg        = { &[("XDG_STATE_HOME", "/xdg")], "/xdg/jd" },
    home       = { &[], "/home/u/.local/state/jd" },
    empty_vars = { &[("JD_STATE_DIR", ""), ("XDG_STATE_HOME", "")], "/home/u/.local/state/jd" },
)]
fn state_dir_precedence(vars: &[(&str, &str)], state: &str) {
    let config = resolve(vars, Some("/home/u")).unwrap();
    assert_eq!(config, Config::with_state_dir(state));
}

#[test]
fn defaults_under_state_dir() {
    let config = Config::with_state_dir("/s");
    assert_eq!(config.db_path, PathBuf::from("/s/jd.db"));
    assert_eq!(config.tasks_dir, PathBuf::from("/s/tasks"));
    assert_eq!(config.table, "tasks");
    assert_eq!(config.settle, Duration::from_millis(500));
}

#[test]
fn overrides_apply_individually() {
    let config = resolve(
        &[
            ("JD_STATE_DIR", "/s"),
            ("JD_DB", "/db/ledger.sqlite"),
            ("JD_TABLE", "jobs"),
            ("JD_TASKS_DIR", "/work"),
            ("JD_SETTLE_MS", "20"),
        ],
        None,
    )
    .unwrap();
    assert_eq!(config.db_path, PathBuf::from("/db/ledger.sqlite"));
    assert_eq!(config.table, "jobs");
    assert_eq!(config.tasks_dir, PathBuf::from("/work"));
    assert_eq!(config.settle, Duration::from_millis(20));
}

#[test]
fn invalid_settle_keeps_default() {
    let config = resolve(&[("JD_STATE_DIR", "/s"), ("JD_SETTLE_MS", "soon")], None).unwrap();
    assert_eq!(config.settle, SETTLE_DELAY);
}

#[test]
fn no_state_dir_without_home() {
    assert!(matches!(resolve(&[], None), Err(EngineError::NoStateDir)));
}
