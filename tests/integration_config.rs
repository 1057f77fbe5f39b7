// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use rdeps::config::Config;
use rdeps::config::loader::ConfigLoader;
use rdeps::logging::{LogConfig, LogLevel};

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty() {
    let config = Config::parse("").unwrap();

    assert!(!config.global.dry);
    assert_eq!(config.deps.url_base, "https://github.com/vladasz/");
    assert_eq!(config.deps.cache_dir, ".rdeps");
    assert_eq!(config.deps.link_name, ".rdeps");
    assert_eq!(config.ios.scheme, "TestEngine");
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
dry = true
output_log_level = 4
file_log_level = 5
log_file = "logs/rdeps.log"

[deps]
url_base = "https://git.example.org/mirror/"
cache_dir = ".deps-cache"
link_name = "deps"

[tools]
git = "/usr/local/bin/git"
cargo = "cargo"

[ios]
targets = ["aarch64-apple-ios", "aarch64-apple-ios-sim"]
packaging_helper = "cargo-lipo"
project_dir = "platform/ios"
sdk = "iphoneos"
scheme = "Engine"
show_sdks = false

[paths]
workspace = "/src/engine"
"#;

    let config = Config::parse(toml).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("logs/rdeps.log")));
    assert_eq!(config.deps.url_base, "https://git.example.org/mirror/");
    assert_eq!(config.tools.git, PathBuf::from("/usr/local/bin/git"));
    assert_eq!(config.tools.xcodebuild, PathBuf::from("xcodebuild"));
    assert_eq!(config.ios.targets.len(), 2);
    assert_eq!(config.ios.project_dir, PathBuf::from("platform/ios"));
    assert!(!config.ios.show_sdks);
    assert_eq!(config.paths.workspace, Some(PathBuf::from("/src/engine")));
}

#[test]
fn config_rejects_unknown_section_key() {
    let err = Config::parse("[deps]\nmirror = \"x\"\n").unwrap_err();

    assert!(format!("{err:#}").contains("mirror"));
}

#[test]
fn config_rejects_wrong_type() {
    assert!(Config::parse("[global]\ndry = \"sometimes\"\n").is_err());
}

#[test]
fn config_rejects_absolute_project_dir() {
    assert!(Config::parse("[ios]\nproject_dir = \"/abs/ios\"\n").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    std::fs::write(&first, "[deps]\nurl_base = \"https://a/\"\nlink_name = \"a\"\n").unwrap();
    std::fs::write(&second, "[deps]\nurl_base = \"https://b/\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&first)
        .add_toml_file(&second)
        .build()
        .unwrap();

    assert_eq!(config.deps.url_base, "https://b/");
    assert_eq!(config.deps.link_name, "a");
}

#[test]
fn config_invalid_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[deps\nurl_base = ").unwrap();

    assert!(ConfigLoader::new().add_toml_file(&broken).build().is_err());
}

// =============================================================================
// Logging config from global section
// =============================================================================

#[test]
fn config_drives_log_config() {
    let config = Config::parse(
        "[global]\noutput_log_level = 1\nfile_log_level = 6\nlog_file = \"r.log\"\n",
    )
    .unwrap();

    let log = LogConfig::from_global(&config.global);

    assert_eq!(log.console_level(), LogLevel::ERROR);
    assert_eq!(log.file_level(), LogLevel::DUMP);
    assert_eq!(log.log_file(), Some(std::path::Path::new("r.log")));
}
