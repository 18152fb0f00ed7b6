// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .env() .capture_output() .maybe_timeout()
//!   .run()
//!       --> tokio::process::Command (kill_on_drop)
//!           stream stdout/stderr
//!       --> ProcessOutput { exit_code, stdout, stderr, timed_out }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
