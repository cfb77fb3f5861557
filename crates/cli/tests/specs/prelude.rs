// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for driving the `jd` binary in specs.

use std::path::Path;
use tempfile::TempDir;

/// An isolated state directory (ledger and job artifacts).
pub struct State {
    dir: TempDir,
}

impl State {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `jd` bound to this state directory.
    pub fn jd(&self) -> Run {
        let mut run = cli();
        run.cmd.env("JD_STATE_DIR", self.path());
        run
    }

    /// Submit `args` and return the printed job id.
    pub fn submit(&self, args: &[&str]) -> String {
        let mut full = vec!["submit"];
        full.extend_from_slice(args);
        self.jd().args(&full).passes().stdout().trim().to_string()
    }
}

/// `jd` with no state directory configured.
pub fn cli() -> Run {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_jd"));
    cmd.env_remove("JD_STATE_DIR")
        .env_remove("JD_DB")
        .env_remove("JD_TABLE")
        .env_remove("JD_TASKS_DIR")
        .env("JD_SETTLE_MS", "50")
        .env("NO_COLOR", "1")
        .env_remove("COLOR");
    Run { cmd }
}

pub struct Run {
    cmd: assert_cmd::Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Output {
        Output::from(self.cmd.assert().success().get_output())
    }

    pub fn fails_with(mut self, code: i32) -> Output {
        Output::from(self.cmd.assert().code(code).get_output())
    }
}

pub struct Output {
    stdout: String,
    stderr: String,
}

impl From<&std::process::Output> for Output {
    fn from(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            self.stdout.contains(expected),
            "stdout missing {expected:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout, expected, "stderr: {}", self.stderr);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            self.stderr.contains(expected),
            "stderr missing {expected:?}\n--- stderr ---\n{}",
            self.stderr
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
