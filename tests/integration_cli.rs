// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use rdeps::cli::Cli;
use rdeps::cli::global::GlobalOptions;
use rdeps::config::loader::ConfigLoader;
use rdeps::platform::PlatformTarget;

// =============================================================================
// Target token
// =============================================================================

#[test]
fn cli_no_target_builds_host() {
    let cli = Cli::try_parse_from(["rdeps"]).unwrap();

    assert_eq!(
        PlatformTarget::select(cli.target.as_deref()),
        PlatformTarget::host()
    );
}

#[test]
fn cli_ios_target() {
    let cli = Cli::try_parse_from(["rdeps", "ios"]).unwrap();

    assert_eq!(
        PlatformTarget::select(cli.target.as_deref()),
        PlatformTarget::IosCross
    );
}

#[test]
fn cli_unknown_target_builds_host() {
    let cli = Cli::try_parse_from(["rdeps", "wasm"]).unwrap();

    assert_eq!(cli.target.as_deref(), Some("wasm"));
    assert_eq!(
        PlatformTarget::select(cli.target.as_deref()),
        PlatformTarget::host()
    );
}

// =============================================================================
// Global options
// =============================================================================

#[test]
fn cli_options_after_target() {
    let cli = Cli::try_parse_from(["rdeps", "ios", "--dry", "-l", "4"]).unwrap();

    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.target.as_deref(), Some("ios"));
}

#[test]
fn cli_long_forms() {
    let cli = Cli::try_parse_from([
        "rdeps",
        "--ini",
        "ci.toml",
        "--log-level",
        "2",
        "--file-log-level",
        "5",
        "--log-file",
        "rdeps.log",
        "--workspace",
        "engine",
        "--no-default-inis",
    ])
    .unwrap();

    let global: GlobalOptions = cli.global;
    assert_eq!(global.inis, [PathBuf::from("ci.toml")]);
    assert_eq!(global.log_level, Some(2));
    assert_eq!(global.file_log_level, Some(5));
    assert_eq!(global.log_file, Some(PathBuf::from("rdeps.log")));
    assert_eq!(global.workspace, Some(PathBuf::from("engine")));
    assert!(global.no_default_inis);
}

#[test]
fn cli_rejects_unknown_flag() {
    let err = Cli::try_parse_from(["rdeps", "--fast"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn cli_rejects_non_numeric_level() {
    assert!(Cli::try_parse_from(["rdeps", "-l", "loud"]).is_err());
}

#[test]
fn cli_help_and_version() {
    let help = Cli::try_parse_from(["rdeps", "--help"]).unwrap_err();
    let version = Cli::try_parse_from(["rdeps", "--version"]).unwrap_err();

    assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    assert_eq!(version.kind(), ErrorKind::DisplayVersion);
}

// =============================================================================
// Overrides into config
// =============================================================================

#[test]
fn cli_log_file_override() {
    let cli = Cli::try_parse_from(["rdeps", "--log-file", "/tmp/rdeps.log"]).unwrap();

    let config = cli
        .global
        .apply_overrides(ConfigLoader::new())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.global.log_file, Some(PathBuf::from("/tmp/rdeps.log")));
}
