// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone-or-pull and remote branch counting.
//!
//! ```text
//! clone_or_pull(url, folder)
//!   path missing          --> git clone -- <url> <path>   --> Cloned
//!   path has .git         --> git -C <path> pull          --> Pulled
//!   path exists, no .git  --> NotAGitRepository (no process)
//!
//! count_branches(folder)
//!   missing or no .git    --> NotAGitRepository (no process)
//!   otherwise             --> git -C <path> branch -r
//!                             trim, split on '\n'
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::GitOperation;
use super::folder::{is_git_repo, resolve_repo_path};
use super::runner::{GitRunner, ShellGit};
use crate::core::process::builder::ProcessOutput;
use crate::error::{GitError, MonitorResult};

/// Which half of clone-or-pull ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// The folder was missing and `git clone` created it.
    Cloned,
    /// The folder was a repository and `git pull` ran in it.
    Pulled,
}

impl SyncAction {
    /// Success message reported to callers.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Cloned => "Repository cloned successfully",
            Self::Pulled => "Git pull executed successfully",
        }
    }
}

/// Result of a successful clone-or-pull.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Whether a clone or a pull ran.
    pub action: SyncAction,
    /// Working copy under the managed root.
    pub path: PathBuf,
    /// Captured stdout of the git process, verbatim.
    pub output: String,
}

/// Result of a successful remote branch listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    /// `git branch -r` output, trimmed once and split on `\n`.
    pub branches: Vec<String>,
}

impl BranchListing {
    /// Number of entries, including the lone empty entry of an empty listing.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.branches.len()
    }
}

/// Splits `git branch -r` output into entries.
///
/// The whole output is trimmed once and then split on `\n`, so only the first
/// entry loses its leading indentation and an empty listing yields `[""]`.
#[must_use]
pub fn parse_remote_branches(stdout: &str) -> Vec<String> {
    stdout.trim().split('\n').map(str::to_string).collect()
}

/// Runs git operations against folders under a fixed root.
#[derive(Clone)]
pub struct GitExecutor {
    root: PathBuf,
    runner: Arc<dyn GitRunner>,
}

impl std::fmt::Debug for GitExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitExecutor")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitExecutor {
    /// Creates an executor rooted at `root` using the given runner.
    pub fn new(root: impl Into<PathBuf>, runner: Arc<dyn GitRunner>) -> Self {
        Self {
            root: root.into(),
            runner,
        }
    }

    /// Creates an executor that shells out to the git CLI.
    pub fn with_shell_git(root: impl Into<PathBuf>, git: ShellGit) -> Self {
        Self::new(root, Arc::new(git))
    }

    /// Returns the managed root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Clones `repo_url` into `folder_name`, or pulls if it is already a repository.
    ///
    /// # Errors
    ///
    /// - `GitError::InvalidFolderName` if the folder name is rejected.
    /// - `GitError::NotAGitRepository` if the folder exists without `.git`.
    /// - `GitError::CommandFailed` if git exits non-zero.
    /// - A process or I/O error if git cannot be run or the path cannot be inspected.
    pub async fn clone_or_pull(
        &self,
        repo_url: &str,
        folder_name: &str,
    ) -> MonitorResult<SyncOutcome> {
        let path = resolve_repo_path(&self.root, folder_name)?;

        if !tokio::fs::try_exists(&path).await? {
            info!(folder = %folder_name, url = %repo_url, "cloning repository");
            let args = vec![
                OsString::from("clone"),
                OsString::from("--"),
                OsString::from(repo_url),
                path.clone().into_os_string(),
            ];
            let output = self.invoke(GitOperation::Clone, args).await?;
            info!(folder = %folder_name, "repository cloned");
            return Ok(SyncOutcome {
                action: SyncAction::Cloned,
                path,
                output: output.stdout().to_string(),
            });
        }

        if !is_git_repo(&path).await? {
            warn!(folder = %folder_name, path = %path.display(), "folder exists but is not a git repository");
            return Err(GitError::NotAGitRepository {
                operation: GitOperation::Pull,
                path: path.display().to_string(),
            }
            .into());
        }

        info!(folder = %folder_name, "pulling repository");
        let output = self
            .invoke(GitOperation::Pull, Self::in_repo(&path, ["pull"]))
            .await?;
        info!(folder = %folder_name, "repository updated");
        Ok(SyncOutcome {
            action: SyncAction::Pulled,
            path,
            output: output.stdout().to_string(),
        })
    }

    /// Lists the remote-tracking branches of `folder_name`.
    ///
    /// # Errors
    ///
    /// - `GitError::InvalidFolderName` if the folder name is rejected.
    /// - `GitError::NotAGitRepository` if the folder is missing or has no `.git`.
    /// - `GitError::CommandFailed` if git exits non-zero.
    /// - A process or I/O error if git cannot be run or the path cannot be inspected.
    pub async fn count_branches(&self, folder_name: &str) -> MonitorResult<BranchListing> {
        let path = resolve_repo_path(&self.root, folder_name)?;

        if !tokio::fs::try_exists(&path).await? || !is_git_repo(&path).await? {
            warn!(folder = %folder_name, "branch count requested for a non-repository");
            return Err(GitError::NotAGitRepository {
                operation: GitOperation::ListRemoteBranches,
                path: path.display().to_string(),
            }
            .into());
        }

        let output = self
            .invoke(
                GitOperation::ListRemoteBranches,
                Self::in_repo(&path, ["branch", "-r"]),
            )
            .await?;
        let branches = parse_remote_branches(output.stdout());
        debug!(folder = %folder_name, count = branches.len(), "remote branches listed");
        Ok(BranchListing { branches })
    }

    /// Builds `-C <path> <args...>`.
    fn in_repo<const N: usize>(path: &Path, args: [&str; N]) -> Vec<OsString> {
        let mut argv = vec![OsString::from("-C"), path.as_os_str().to_os_string()];
        argv.extend(args.into_iter().map(OsString::from));
        argv
    }

    /// Runs one git invocation, turning a failed exit into `GitError::CommandFailed`.
    async fn invoke(
        &self,
        operation: GitOperation,
        args: Vec<OsString>,
    ) -> MonitorResult<ProcessOutput> {
        let command = describe(&args);
        let output = self.runner.run(args).await?;

        if output.success() {
            return Ok(output);
        }

        let mut stderr = output.stderr().to_string();
        if output.timed_out() {
            if !stderr.is_empty() && !stderr.ends_with('\n') {
                stderr.push('\n');
            }
            stderr.push_str("process killed after exceeding the configured timeout");
        }
        error!(
            %operation,
            exit_code = output.exit_code(),
            stderr = %stderr.trim_end(),
            "git command failed"
        );
        Err(GitError::CommandFailed {
            operation,
            command,
            stderr,
        }
        .into())
    }
}

/// Renders an argument vector as a `git ...` command line.
fn describe(args: &[OsString]) -> String {
    let mut command = String::from("git");
    for arg in args {
        command.push(' ');
        command.push_str(&arg.to_string_lossy());
    }
    command
}
