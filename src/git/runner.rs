// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git process runner.
//!
//! ```text
//! GitRunner::run(args) --> ShellGit --> git <args>
//!   GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//!   stdout/stderr captured, non-zero exit returned as data
//! ```

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::MonitorResult;

/// Runs one git invocation and reports its raw outcome.
///
/// A non-zero exit is not an error at this level: the executor decides what
/// a failed exit means. Errors are reserved for not being able to run git at
/// all.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Runs `git` with `args` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be spawned or awaited.
    async fn run(&self, args: Vec<OsString>) -> MonitorResult<ProcessOutput>;
}

/// Git CLI runner built on [`ProcessBuilder`].
#[derive(Debug, Clone)]
pub struct ShellGit {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for ShellGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellGit {
    /// Creates a runner for the given git executable (name or path).
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            timeout: None,
        }
    }

    /// Kills git invocations that run longer than `timeout`; `None` waits forever.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured git executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl GitRunner for ShellGit {
    async fn run(&self, args: Vec<OsString>) -> MonitorResult<ProcessOutput> {
        let output = ProcessBuilder::new(&self.program)
            .name("git")
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .capture_output()
            .maybe_timeout(self.timeout)
            .run()
            .await?;
        Ok(output)
    }
}
