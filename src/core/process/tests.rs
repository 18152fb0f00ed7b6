// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use super::builder::ProcessBuilder;
use super::io::READER_GRACE;
use crate::error::ProcessError;

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("sh").args(["-c", script])
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo_keeps_trailing_newline() {
    let output = ProcessBuilder::new("echo")
        .args(["hello"])
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout(), "hello\n");
    assert_eq!(output.stderr(), "");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_captures_multiline_output_verbatim() {
    let output = sh("printf '  a\\n  b\\n\\n'")
        .capture_stdout()
        .run()
        .await
        .expect("printf should succeed");

    assert_eq!(output.stdout(), "  a\n  b\n\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit_is_data() {
    let output = sh("echo oops >&2; exit 42")
        .name("failing")
        .capture_output()
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
    assert!(!output.timed_out());
    assert_eq!(output.stderr(), "oops\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_is_added_to_inherited() {
    let output = sh("echo \"$GREETING\"; test -n \"$PATH\" && echo inherited")
        .env("GREETING", "hi there")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), "hi there\ninherited\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_kills_child() {
    let output = sh("sleep 30")
        .maybe_timeout(Some(Duration::from_millis(200)))
        .capture_output()
        .run()
        .await
        .expect("timed out process still yields output");

    assert!(output.timed_out());
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_returns_while_grandchild_holds_pipes() {
    // The backgrounded sleep inherits stdout/stderr and outlives the killed shell.
    let started = Instant::now();
    let output = sh("echo before; sleep 6 & sleep 30")
        .maybe_timeout(Some(Duration::from_millis(200)))
        .capture_output()
        .run()
        .await
        .expect("timed out process still yields output");

    assert!(output.timed_out());
    assert_eq!(output.stdout(), "before\n");
    assert!(
        started.elapsed() < Duration::from_millis(200) + READER_GRACE + Duration::from_secs(3),
        "run() waited {:?} for the grandchild",
        started.elapsed()
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_no_timeout_by_default() {
    let output = sh("sleep 0.3; echo done")
        .maybe_timeout(None)
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert!(output.success());
    assert_eq!(output.stdout(), "done\n");
}

#[tokio::test]
async fn test_process_missing_executable() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .await
        .expect_err("spawn should fail");
    insta::assert_snapshot!(err.to_string(), @"executable not found: 'nonexistent_program_12345' (not in PATH)");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_spawn_failure() {
    // A directory exists but cannot be executed.
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let err = ProcessBuilder::new(temp.path())
        .run()
        .await
        .expect_err("spawn should fail");
    assert!(matches!(err, ProcessError::SpawnFailed { .. }));
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("git").args(["clone", "https://example.com/r.git", "/srv/my repo"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git clone https://example.com/r.git "/srv/my repo""#);
}

#[test]
fn test_executable_lookup_found() {
    // git is required by the service and its tests
    let path = ProcessBuilder::find("git").expect("find: git should be found");
    assert!(path.exists());
    assert_eq!(ProcessBuilder::find("git"), Some(path));
}

#[test]
fn test_executable_lookup_not_found() {
    assert!(ProcessBuilder::find("nonexistent_program_12345").is_none());
}
