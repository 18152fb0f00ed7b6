// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitmonitor.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitmonitor.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GITMONITOR_* env vars
//! 5. --set KEY=VALUE
//! 6. --root / --bind
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITMONITOR_PATHS__ROOT=/srv/repos    → paths.root = "/srv/repos"
//! GITMONITOR_SERVER__BIND=0.0.0.0:80   → server.bind = "0.0.0.0:80"
//! GITMONITOR_GIT__TIMEOUT_SECS=600     → git.timeout_secs = 600
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, LoggingConfig, PathsConfig, ServerConfig};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GITMONITOR";

/// Default config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gitmonitor.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Managed root.
    pub paths: PathsConfig,
    /// Git invocation.
    pub git: GitConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitmonitor::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitmonitor.toml")
    ///     .with_env_prefix("GITMONITOR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<()> {
        self.paths.validate()?;
        self.git.validate()?;
        Ok(())
    }

    /// Format configuration options for display, ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("server.bind", self.server.bind.to_string());
        options.insert("paths.root", self.paths.root.display().to_string());
        options.insert("git.program", self.git.program.clone());
        options.insert(
            "git.timeout_secs",
            self.git
                .timeout_secs
                .map_or_else(|| "none".to_string(), |secs| secs.to_string()),
        );
        options.insert("logging.level", self.logging.level.as_u8().to_string());
        options.insert(
            "logging.file_level",
            self.logging.file_level.as_u8().to_string(),
        );
        options.insert(
            "logging.file",
            self.logging
                .file
                .as_ref()
                .map_or_else(|| "none".to_string(), |p| p.display().to_string()),
        );
        options.insert("logging.format", self.logging.format.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
