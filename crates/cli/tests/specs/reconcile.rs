// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jd reconcile` specs

use crate::prelude::*;

#[test]
fn reconcile_moves_ended_jobs_out_of_running() {
    let state = State::new();
    let id = state.submit(&["true"]);

    // The ledger still says running until something refreshes it
    state.jd().args(&["status"]).passes().stdout_eq(&format!("{id}\n"));

    state
        .jd()
        .args(&["reconcile"])
        .passes()
        .stdout_eq("checked 1: 1 finished, 0 timed out, 0 invalid, 0 errors\n");
    state.jd().args(&["status"]).passes().stdout_eq("");
}

#[test]
fn second_sweep_has_nothing_to_do() {
    let state = State::new();
    state.submit(&["true"]);
    state.jd().args(&["reconcile"]).passes();

    let json = state.jd().args(&["-o", "json", "reconcile"]).passes().json();
    assert_eq!(json["checked"], 0);
}

#[test]
fn zero_interval_is_rejected() {
    let state = State::new();
    state
        .jd()
        .args(&["reconcile", "--every", "0"])
        .fails_with(2)
        .stderr_has("invalid --every value");
}

#[test]
fn empty_state_reconciles_cleanly() {
    let state = State::new();
    state.jd().args(&["reconcile"]).passes().stdout_has("checked 0");
}
