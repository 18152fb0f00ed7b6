// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, MonitorError, MonitorResult, ProcessError};
use crate::git::GitOperation;

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "root".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[paths]'");
}

#[test]
fn test_git_error_display() {
    let err = GitError::CommandFailed {
        operation: GitOperation::Pull,
        command: "git -C /srv/demo pull".to_string(),
        stderr: "fatal: not possible to fast-forward".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"git pull failed: git -C /srv/demo pull: fatal: not possible to fast-forward"
    );
}

#[test]
fn test_git_error_converts_boxed() {
    let err: MonitorError = GitError::InvalidFolderName {
        name: "..".to_string(),
        reason: "must not be '.' or '..'",
    }
    .into();

    assert!(matches!(
        err.as_git(),
        Some(GitError::InvalidFolderName { .. })
    ));
}

#[test]
fn test_process_error_is_not_git() {
    let err: MonitorError = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    }
    .into();
    assert!(err.as_git().is_none());
    assert_eq!(
        err.to_string(),
        "process error: executable not found: 'git' (not in PATH)"
    );
}

#[test]
fn test_monitor_error_size() {
    // Every variant is a thin Box: pointer plus discriminant
    let size = std::mem::size_of::<MonitorError>();
    assert!(size <= 16, "MonitorError is {size} bytes, expected <= 16");
}

#[test]
fn test_monitor_result_size() {
    let size = std::mem::size_of::<MonitorResult<()>>();
    assert!(size <= 16, "MonitorResult<()> is {size} bytes, expected <= 16");
}
