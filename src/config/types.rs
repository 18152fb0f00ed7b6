// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitmonitor.
//!
//! ```text
//! Config: ServerConfig, PathsConfig, GitConfig, LoggingConfig
//! ```

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};

/// Default managed root for repositories.
pub const DEFAULT_ROOT: &str = "/app/gitmonitor";

/// Default listen address.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8000));

/// HTTP listener options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
        }
    }
}

/// Filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding one working copy per folder name.
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl PathsConfig {
    /// Validates the paths section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `root` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "root".to_string(),
            });
        }
        Ok(())
    }
}

/// Git invocation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path.
    pub program: String,
    /// Kill git after this many seconds; unset waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout_secs: None,
        }
    }
}

impl GitConfig {
    /// Returns the configured timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validates the git section.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `program` is empty or `timeout_secs` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "git".to_string(),
                key: "program".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "timeout_secs".to_string(),
                message: "must be greater than zero (omit it to disable the timeout)".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Console log level (0-5).
    pub level: LogLevel,
    /// File log level (0-5).
    pub file_level: LogLevel,
    /// Log file path; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Console format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::INFO,
            file_level: LogLevel::TRACE,
            file: None,
            format: LogFormat::Text,
        }
    }
}
