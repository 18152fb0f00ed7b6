// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Folder-name validation and repository path resolution.
//!
//! ```text
//! "demo"        --> <root>/demo
//! "../etc"      --> InvalidFolderName
//! "a/b", "a\b"  --> InvalidFolderName
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{GitError, MonitorResult};

/// Checks that `name` is usable as exactly one directory name under the root.
///
/// # Errors
///
/// Returns `GitError::InvalidFolderName` describing the first rule violated.
pub fn validate_folder_name(name: &str) -> MonitorResult<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be '.' or '..'")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name.contains('\0') {
        Some("must not contain NUL bytes")
    } else {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => None,
            _ => Some("must be a single directory name"),
        }
    };

    match reason {
        Some(reason) => Err(GitError::InvalidFolderName {
            name: name.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

/// Resolves `folder_name` to its path under `root`, validating it first.
///
/// # Errors
///
/// Returns `GitError::InvalidFolderName` if the name would escape `root` or
/// name more than one path segment.
pub fn resolve_repo_path(root: &Path, folder_name: &str) -> MonitorResult<PathBuf> {
    validate_folder_name(folder_name)?;
    Ok(root.join(folder_name))
}

/// Returns whether `path` is a directory with a `.git` entry (directory or gitfile).
///
/// A missing path or a non-directory (such as a regular file) is not a repository.
///
/// # Errors
///
/// Returns an I/O error if existence cannot be determined (e.g. permissions).
pub async fn is_git_repo(path: &Path) -> MonitorResult<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Ok(false),
        Err(e) if is_absent(&e) => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    match tokio::fs::try_exists(path.join(".git")).await {
        Ok(found) => Ok(found),
        Err(e) if is_absent(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}
