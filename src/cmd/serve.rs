// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `serve` command.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::server::{Server, shutdown_signal};

/// Runs the HTTP service until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the root cannot be created or the listener cannot be bound.
pub async fn run_serve_command(config: &Config) -> Result<()> {
    match ProcessBuilder::find(&config.git.program) {
        Some(path) => info!(git = %path.display(), "using git executable"),
        None => warn!(
            program = %config.git.program,
            "git executable not found; every request will fail until it is installed"
        ),
    }

    let server = Server::new(config).await?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    server.run(shutdown).await
}
