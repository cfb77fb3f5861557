// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd submit` specs

use crate::prelude::*;

#[test]
fn submit_prints_id_and_waits_for_completion() {
    let state = State::new();
    let id = state.submit(&["echo", "--options", "hello"]);

    assert_eq!(id.len(), 36, "expected a UUID, got {id:?}");
    let result = state.path().join("tasks").join(&id).join(format!("{id}.result"));
    assert_eq!(std::fs::read_to_string(result).unwrap(), "0\n");
}

#[test]
fn disallowed_character_is_rejected_before_launch() {
    let state = State::new();
    state
        .jd()
        .args(&["submit", "echo;rm"])
        .fails_with(2)
        .stderr_has("command contains disallowed character ';' at position 4")
        .stderr_has("    ^");

    assert!(!state.path().join("tasks").exists());
    state.jd().args(&["status"]).passes().stdout_eq("");
}

#[test]
fn unterminated_quote_is_rejected() {
    let state = State::new();
    state
        .jd()
        .args(&["submit", "echo", "--options", "'open"])
        .fails_with(2)
        .stderr_has("unterminated ' quote");
}

#[test]
fn unknown_signal_is_rejected() {
    let state = State::new();
    state
        .jd()
        .args(&["submit", "true", "--signal", "NOPE"])
        .fails_with(2)
        .stderr_has("unknown signal `NOPE`");
}

#[test]
fn missing_program_fails_and_records_invalid() {
    let state = State::new();
    state
        .jd()
        .args(&["submit", "jd_missing_program"])
        .fails_with(1)
        .stderr_has("failed to launch `jd_missing_program`");

    state.jd().args(&["status"]).passes().stdout_eq("");
}

#[test]
fn quoted_options_and_input_reach_the_process() {
    let state = State::new();
    let id = state.submit(&["echo", "--options", "'a  b' c"]);
    state.jd().args(&["status", &id, "-v"]).passes().stdout_has("a  b c\n");

    let id = state.submit(&["cat", "--input", "from stdin"]);
    state.jd().args(&["status", &id, "-v"]).passes().stdout_has("from stdin");
}

#[test]
fn json_output_wraps_id() {
    let state = State::new();
    let out = state.jd().args(&["-o", "json", "submit", "true"]).passes();
    assert_eq!(out.json()["id"].as_str().unwrap().len(), 36);
}
