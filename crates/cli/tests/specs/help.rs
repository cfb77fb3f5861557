// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("submit")
        .stdout_has("status")
        .stdout_has("reconcile");
}

#[test]
fn submit_help_lists_job_parameters() {
    cli()
        .args(&["submit", "--help"])
        .passes()
        .stdout_has("--options")
        .stdout_has("--timeout")
        .stdout_has("--kill")
        .stdout_has("--signal")
        .stdout_has("--path");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_subcommand_is_usage_error() {
    cli().args(&["frobnicate"]).fails_with(2);
}
