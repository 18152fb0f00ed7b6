// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP surface.
//!
//! ```text
//! POST /git-pull/        {repo_url, folder_name} --> GitExecutor::clone_or_pull
//! POST /count-branches/  {folder_name}           --> GitExecutor::count_branches
//! GET  /healthz
//!
//!   TcpListener --> axum::serve --> Router (TraceLayer) --> handlers
//!                        |
//!        graceful shutdown on CancellationToken
//! ```

pub mod error;
pub mod handlers;
pub mod models;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{MonitorResult, Result};
use crate::git::{GitExecutor, ShellGit};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub executor: GitExecutor,
}

/// Builds the router for the given executor.
pub fn build_app(executor: GitExecutor) -> Router {
    let state = AppState { executor };
    Router::new()
        .route("/git-pull/", post(handlers::git_pull))
        .route("/git-pull", post(handlers::git_pull))
        .route("/count-branches/", post(handlers::count_branches))
        .route("/count-branches", post(handlers::count_branches))
        .route("/healthz", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The HTTP service.
#[derive(Debug)]
pub struct Server {
    bind: SocketAddr,
    app: Router,
}

impl Server {
    /// Creates the managed root and wires a git CLI executor from `config`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the root directory cannot be created.
    pub async fn new(config: &Config) -> MonitorResult<Self> {
        let root = &config.paths.root;
        tokio::fs::create_dir_all(root).await?;
        info!(root = %root.display(), "managed root ready");

        let git = ShellGit::new(&config.git.program).with_timeout(config.git.timeout());
        Ok(Self::with_executor(
            config.server.bind,
            GitExecutor::with_shell_git(root, git),
        ))
    }

    /// Creates a server around an existing executor.
    #[must_use]
    pub fn with_executor(bind: SocketAddr, executor: GitExecutor) -> Self {
        Self {
            bind,
            app: build_app(executor),
        }
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.bind
    }

    /// Binds the configured address and serves until `shutdown` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(self.bind).await.map_err(|err| {
            anyhow::anyhow!("failed to bind HTTP listener on {}: {err}", self.bind)
        })?;
        self.run_on(listener, shutdown).await
    }

    /// Serves on an already-bound listener until `shutdown` is cancelled.
    ///
    /// In-flight requests are drained before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn run_on(self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        let addr = listener.local_addr()?;
        info!(%addr, "HTTP server listening");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|err| anyhow::anyhow!("HTTP server error: {err}"))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}
