// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --set KEY=VAL     ← Direct config override
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← logging.file override
//! --root DIR        ← paths.root override
//! --bind ADDR       ← server.bind override
//!
//! Precedence: CLI flags > --set > env > --config > gitmonitor.toml > defaults
//! ```

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Sets an option, such as 'git/timeout_secs=600' or 'paths.root=/srv/repos'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", global = true, action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the managed repositories.
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Address to listen on.
    #[arg(short = 'b', long = "bind", value_name = "ADDR", global = true)]
    pub bind: Option<SocketAddr>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides, in the order
    /// they must be applied.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("logging/level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("logging/file_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("logging/file={}", path.display()));
        }

        if let Some(ref root) = self.root {
            overrides.push(format!("paths/root={}", root.display()));
        }

        if let Some(bind) = self.bind {
            overrides.push(format!("server/bind={bind}"));
        }

        overrides
    }
}
