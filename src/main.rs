// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> bootstrap
//!                                  resolve, fetch, link, build
//! ```

use std::process::ExitCode;

use rdeps::cli::{self, global::GlobalOptions};
use rdeps::cmd::bootstrap::run_bootstrap_command;
use rdeps::config::loader::ConfigLoader;
use rdeps::config::{Config, LOCAL_CONFIG_FILE};
use rdeps::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Prefix for environment variable overrides (`RDEPS_DEPS__URL_BASE`, ...).
const ENV_PREFIX: &str = "RDEPS";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = build_config_loader(&cli.global);
    let loaded_files = loader.format_loaded_files();
    let config = match load_config(&cli.global, loader) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from_global(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    log_startup(&config, &loaded_files);

    ExitCode::from(run_bootstrap_command(cli.target.as_deref(), config).await)
}

fn log_startup(config: &Config, loaded_files: &[String]) {
    tracing::info!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        family = std::env::consts::FAMILY,
        version = env!("CARGO_PKG_VERSION"),
        "Host"
    );
    for line in loaded_files {
        tracing::debug!("{line}");
    }
    for line in config.format_options() {
        tracing::debug!("{line}");
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions, loader: ConfigLoader) -> rdeps::error::Result<Config> {
    global.apply_overrides(loader)?.build()
}
