// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitmonitor using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitmonitor [global options] [command]
//! serve     (default)
//! options
//! configs
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// HTTP service that clones, pulls and inspects git repositories.
#[derive(Debug, Parser)]
#[command(
    name = "gitmonitor",
    author,
    version,
    about = "Git clone/pull/branch service over HTTP",
    long_about = "gitmonitor Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Serves POST /git-pull/ and POST /count-branches/ over HTTP,\n\
                  running the git CLI against folders under a managed root.\n\
                  Invoking `gitmonitor` with no command starts the server.",
    after_help = "CONFIGURATION:\n\n\
                  gitmonitor reads `gitmonitor.toml` from the current directory if\n\
                  present, then every file given with --config in order. Variables\n\
                  named GITMONITOR_<SECTION>__<KEY> override the files, --set\n\
                  overrides the environment, and --root/--bind/--log-* override\n\
                  everything else."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the command to run, `serve` when none was given.
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

/// Available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Runs the HTTP service.
    Serve,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
