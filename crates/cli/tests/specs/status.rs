// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd status` specs

use crate::prelude::*;

#[test]
fn finished_job_reports_exit_code_and_output() {
    let state = State::new();
    let id = state.submit(&["echo", "--options", "hello"]);

    state
        .jd()
        .args(&["status", &id, "--verbose"])
        .passes()
        .stdout_has("status:  finished")
        .stdout_has("exit:    0")
        .stdout_has("── stdout ──\nhello\n");
}

#[test]
fn timed_out_job_reports_124() {
    let state = State::new();
    let id = state.submit(&["sleep", "--options", "5", "--timeout", "0.5", "--kill", "1"]);

    let out = state.jd().args(&["status", &id, "-o", "json"]).passes();
    let json = out.json();
    assert_eq!(json["status"], "timed_out");
    assert_eq!(json["exit_code"], 124);
}

#[test]
fn verbose_json_includes_record() {
    let state = State::new();
    let id = state.submit(&["true"]);

    let json = state.jd().args(&["-o", "json", "status", &id, "-v"]).passes().json();
    assert_eq!(json["job"]["kind"], "cmd");
    assert_eq!(json["job"]["params"]["signal"], "TERM");
    assert_eq!(json["stdout"], "");
}

#[test]
fn unknown_id_exits_3() {
    let state = State::new();
    state
        .jd()
        .args(&["status", "no-such-job"])
        .fails_with(3)
        .stderr_has("job not found: no-such-job");
}

#[test]
fn state_dir_flag_overrides_environment() {
    let state = State::new();
    let other = State::new();
    let id = state.submit(&["true"]);

    other
        .jd()
        .args(&["--state-dir", &state.path().display().to_string(), "status", &id])
        .passes()
        .stdout_has("finished");
}
