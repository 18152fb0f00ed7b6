// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Serve | Options | Configs | Version
//! ```

use std::process::ExitCode;

use gitmonitor::cli::global::GlobalOptions;
use gitmonitor::cli::{self, Command};
use gitmonitor::cmd::config::{build_config_loader, run_configs_command, run_options_command};
use gitmonitor::cmd::serve::run_serve_command;
use gitmonitor::config::Config;
use gitmonitor::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let result = match cli.command_or_default() {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Configs => build_config_loader(&cli.global).map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Command::Options => load_config(&cli.global).map(|config| run_options_command(&config)),
        Command::Serve => match load_config(&cli.global) {
            Ok(config) => {
                let _log_guard = match init_logging(&build_log_config(&config)) {
                    Ok(guard) => guard,
                    Err(e) => {
                        eprintln!("Failed to initialize logging: {e}");
                        return ExitCode::FAILURE;
                    }
                };
                serve(&config).await
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &Config) -> gitmonitor::error::Result<()> {
    run_serve_command(config).await.inspect_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "gitmonitor stopped with an error");
    })
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.logging.level)
        .with_file_level(config.logging.file_level)
        .maybe_with_log_file(config.logging.file.as_ref().map(|p| p.display().to_string()))
        .with_format(config.logging.format)
        .build()
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> gitmonitor::error::Result<Config> {
    build_config_loader(global)
        .and_then(gitmonitor::config::loader::ConfigLoader::build)
        .map_err(|e| e.context("failed to load config"))
}
