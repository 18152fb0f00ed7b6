// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          MonitorError (~16 bytes)
//!                 |
//!      +-------+-----+-----+
//!      |       |     |     |
//!      v       v     v     v
//!     Git    Cfg   Proc   Io
//!     Box    Box   Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      CommandFailed, NotAGitRepository, InvalidFolderName
//!   Config   ParseError, MissingKey, InvalidValue
//!   Process  ExecutableNotFound, SpawnFailed, OutputError
//! ```
//!
//! HTTP status mapping lives in `server::error`; nothing here knows about
//! transports.

use thiserror::Error;

use crate::git::GitOperation;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MonitorError`].
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~16 bytes on the stack.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl MonitorError {
    /// Returns the git error if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MonitorError {
                fn from(err: $error) -> Self {
                    MonitorError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process exited non-zero (or was killed on timeout).
    #[error("{operation} failed: {command}: {stderr}")]
    CommandFailed {
        operation: GitOperation,
        command: String,
        stderr: String,
    },

    /// Target path is missing or has no `.git` entry.
    #[error("not a git repository: {path}")]
    NotAGitRepository {
        operation: GitOperation,
        path: String,
    },

    /// Folder name cannot be used as a single path segment under the root.
    #[error("invalid folder name '{name}': {reason}")]
    InvalidFolderName { name: String, reason: &'static str },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting on the process.
    #[error("failed to drive process '{command}': {source}")]
    OutputError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
