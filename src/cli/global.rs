// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        <- Additional config files (can repeat)
//! --dry             <- Report actions without performing them
//! --log-level N     <- Console verbosity (0-6)
//! --file-log-level  <- File verbosity (defaults to --log-level)
//! --log-file FILE   <- global.log_file override
//! --workspace DIR   <- paths.workspace override
//!
//! Precedence: CLI flags > RDEPS_* env > --ini > rdeps.toml > defaults
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Options shared by every invocation.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Logs what would be cloned, linked and built without doing any of it.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Workspace root receiving the cache link (defaults to the current directory).
    #[arg(short = 'w', long = "workspace", value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Disables loading `rdeps.toml` from the current directory.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Returns the configuration keys these flags override.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", i64::from(level).into()));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", i64::from(level).into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        if self.dry {
            overrides.push(("global.dry", true.into()));
        }

        if let Some(ref workspace) = self.workspace {
            overrides.push(("paths.workspace", workspace.display().to_string().into()));
        }

        overrides
    }

    /// Applies [`to_config_overrides`](Self::to_config_overrides) to `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override key is rejected by the loader.
    pub fn apply_overrides(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        self.to_config_overrides()
            .into_iter()
            .try_fold(loader, |loader, (key, value)| loader.set(key, value))
    }
}
