// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for gitmonitor.

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Assembles the loader for the given global options.
///
/// `gitmonitor.toml` in the current directory comes first, then every
/// `--config` file, the environment, `--set`, and finally the dedicated flags.
///
/// # Errors
///
/// Returns an error if a `--set` entry is not of the form `KEY=VALUE`.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .set_all(global.to_config_overrides())
}

/// Display current configuration options.
pub fn run_options_command(config: &crate::config::Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
