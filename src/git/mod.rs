// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations on repositories under the managed root.
//!
//! ```text
//!        GitExecutor (root, runner)
//!     clone_or_pull    count_branches
//!            \              /
//!             v            v
//!      folder::resolve_repo_path
//!      (single path segment under root)
//!                  |
//!                  v
//!      ,----------------------,
//!      |  GitRunner (trait)   |
//!      '----------+-----------'
//!                 |
//!                 v
//!             ShellGit
//!     ProcessBuilder --> git CLI
//! ```
//!
//! Every request runs at most one git process. No locking: two requests for
//! the same folder race at the filesystem level.

pub mod executor;
pub mod folder;
pub mod runner;


pub use executor::{BranchListing, GitExecutor, SyncAction, SyncOutcome, parse_remote_branches};
pub use folder::{is_git_repo, resolve_repo_path, validate_folder_name};
pub use runner::{GitRunner, ShellGit};

/// The git invocations the service performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOperation {
    /// `git clone <url> <path>`
    Clone,
    /// `git -C <path> pull`
    Pull,
    /// `git -C <path> branch -r`
    ListRemoteBranches,
}

impl GitOperation {
    /// Human-readable prefix for failure details returned to callers.
    #[must_use]
    pub const fn failure_context(self) -> &'static str {
        match self {
            Self::Clone => "Error while cloning repository",
            Self::Pull => "Error while executing git pull",
            Self::ListRemoteBranches => "Error while counting branches",
        }
    }
}

impl std::fmt::Display for GitOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clone => write!(f, "git clone"),
            Self::Pull => write!(f, "git pull"),
            Self::ListRemoteBranches => write!(f, "git branch -r"),
        }
    }
}
