// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for rdeps using clap derive.
//!
//! # Usage
//!
//! ```text
//! rdeps [global options]          native build for the host
//! rdeps [global options] ios      iOS cross build
//! ```

pub mod global;


use clap::Parser;

use crate::cli::global::GlobalOptions;

/// Dependency-cache-aware build orchestrator.
#[derive(Debug, Parser)]
#[command(
    name = "rdeps",
    author,
    version,
    about = "Dependency-cache-aware build orchestrator",
    long_about = "rdeps Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches the shared dependencies into ~/.rdeps/ (once), links\n\
                  them into the workspace as .rdeps and runs the build. Pass\n\
                  `ios` to cross-compile and build the iOS project instead of\n\
                  the native crate.",
    after_help = "CONFIG FILES:\n\n\
                  rdeps reads `rdeps.toml` from the current directory if present,\n\
                  then every file given with --ini, in order. RDEPS_* environment\n\
                  variables (e.g. RDEPS_DEPS__URL_BASE) override files, and\n\
                  command line flags override everything. Use --no-default-inis\n\
                  to skip `rdeps.toml`."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Build target; `ios` selects the iOS cross build, anything else the host build.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
