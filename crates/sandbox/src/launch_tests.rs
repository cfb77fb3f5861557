// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::plan::LaunchRecord;
use crate::probe::probe;
use jd_core::{JobParams, JobStatus};
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

fn setup(params: JobParams) -> (TempDir, JobId, JobLocation, LaunchPlan) {
    let dir = tempfile::tempdir().unwrap();
    let id = JobId::from("job-1");
    let location = JobLocation::new(dir.path(), id.as_str());
    let plan = LaunchPlan::new(&params).unwrap();
    (dir, id, location, plan)
}

async fn run(id: &JobId, location: &JobLocation, plan: &LaunchPlan) {
    spawn(id, location, plan).await.unwrap().supervise().await;
}

fn marker(location: &JobLocation) -> String {
    std::fs::read_to_string(&location.result).unwrap()
}

#[tokio::test]
async fn echo_captures_stdout_and_exit_code() {
    let (_dir, id, location, plan) = setup(JobParams::new("echo").options("hello"));
    run(&id, &location, &plan).await;

    assert_eq!(marker(&location), "0\n");
    assert_eq!(std::fs::read_to_string(&location.stdout).unwrap(), "hello\n");
    assert_eq!(std::fs::read_to_string(&location.stderr).unwrap(), "");
}

#[tokio::test]
async fn input_is_piped_to_stdin() {
    let (_dir, id, location, plan) = setup(JobParams::new("cat").input("piped\ndata"));
    run(&id, &location, &plan).await;

    assert_eq!(std::fs::read_to_string(&location.stdin).unwrap(), "piped\ndata");
    assert_eq!(std::fs::read_to_string(&location.stdout).unwrap(), "piped\ndata");
}

#[tokio::test]
async fn nonzero_exit_is_recorded() {
    let (_dir, id, location, plan) = setup(JobParams::new("false"));
    run(&id, &location, &plan).await;
    assert_eq!(marker(&location), "1\n");
}

#[tokio::test]
async fn soft_signal_records_timeout_exit() {
    let params = JobParams::new("sleep").options("5").timeout(0.2).kill(2.0);
    let (_dir, id, location, plan) = setup(params);
    let started = std::time::Instant::now();
    run(&id, &location, &plan).await;

    assert_eq!(marker(&location), "124\n");
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(probe(&location, false).unwrap().status, JobStatus::TimedOut);
}

#[tokio::test]
async fn ignored_signal_escalates_to_sigkill() {
    let (_dir, id, location, mut plan) = setup(JobParams::new("sh"));
    plan.args = vec!["-c".to_string(), "trap '' TERM; sleep 5".to_string()];
    plan.timeout = Duration::from_millis(200);
    plan.kill = Duration::from_millis(300);
    run(&id, &location, &plan).await;

    assert_eq!(marker(&location), "137\n");
    assert_eq!(probe(&location, false).unwrap().status, JobStatus::Finished);
}

#[tokio::test]
async fn extra_path_is_searched_first() {
    let tools = tempfile::tempdir().unwrap();
    let script = tools.path().join("jdtool");
    std::fs::write(&script, "#!/bin/sh\necho from tool\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let params = JobParams::new("jdtool").path(tools.path().display().to_string());
    let (_dir, id, location, plan) = setup(params);
    run(&id, &location, &plan).await;

    assert_eq!(std::fs::read_to_string(&location.stdout).unwrap(), "from tool\n");
}

#[tokio::test]
async fn launch_record_is_owner_only_json() {
    let params = JobParams::new("echo").options("a 'b c'").timeout(5.0).kill(1.0);
    let (_dir, id, location, plan) = setup(params);
    run(&id, &location, &plan).await;

    let meta = std::fs::metadata(&location.launch).unwrap();
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    let record: LaunchRecord =
        serde_json::from_slice(&std::fs::read(&location.launch).unwrap()).unwrap();
    assert_eq!(record, plan.record());
    assert_eq!(record.args, vec!["a", "b c"]);
}

#[tokio::test]
async fn missing_program_fails_to_launch() {
    let (_dir, id, location, plan) = setup(JobParams::new("jd_no_such_program_here").input("x"));
    let err = spawn(&id, &location, &plan).await.err().unwrap();
    assert!(matches!(err, SandboxError::Launch { ref command, .. } if command == "jd_no_such_program_here"));
    assert!(!location.result.exists());
}

#[tokio::test]
async fn failed_launch_keeps_only_the_input_file() {
    let (_dir, id, location, plan) = setup(JobParams::new("jd_no_such_program_here").input("x"));
    spawn(&id, &location, &plan).await.err().unwrap();

    assert_eq!(std::fs::read_to_string(&location.stdin).unwrap(), "x");
    for path in [&location.launch, &location.stdout, &location.stderr, &location.result] {
        assert!(!path.exists(), "{} should not exist", path.display());
    }
}

#[tokio::test]
async fn artifacts_are_never_overwritten() {
    let (_dir, id, location, plan) = setup(JobParams::new("true"));
    run(&id, &location, &plan).await;

    let err = spawn(&id, &location, &plan).await.err().unwrap();
    assert!(matches!(err, SandboxError::Io { ref path, .. } if *path == location.stdin));
}

#[tokio::test]
async fn dropped_supervision_kills_group_and_touches_marker() {
    let (_dir, id, location, plan) = setup(JobParams::new("sleep").options("30"));
    let spawned = spawn(&id, &location, &plan).await.unwrap();
    assert!(!location.result.exists());
    drop(spawned);

    assert_eq!(marker(&location), "");
    let probe = probe(&location, false).unwrap();
    assert_eq!(probe.status, JobStatus::Finished);
    assert_eq!(probe.exit_code, None);
}

#[test]
fn marker_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("j.result");
    write_marker(&path, Some(7)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "7\n");
    assert!(!dir.path().join("j.result.tmp").exists());

    write_marker(&path, None).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[yare::parameterized(
    success   = { 0, Some(0) },
    exit_3    = { 3 << 8, Some(3) },
    sigkill   = { 9, Some(137) },
    sigterm   = { 15, Some(143) },
)]
fn exit_codes_follow_shell_convention(raw: i32, expected: Option<i32>) {
    let id = JobId::from("j");
    assert_eq!(exit_code(&id, Ok(ExitStatus::from_raw(raw))), expected);
}

#[test]
fn wait_error_has_no_code() {
    let id = JobId::from("j");
    assert_eq!(exit_code(&id, Err(io::Error::other("gone"))), None);
}
