// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::{LogConfig, LogLevel};
use crate::config::types::GlobalConfig;

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::new(0).ok(), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::new(6).ok(), Some(LogLevel::DUMP));
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(9), None);
    assert_eq!(LogLevel::try_from(4).map(u8::from).ok(), Some(4));
}

#[test]
fn test_log_level_invalid_message() {
    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9"
    );
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<&str> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(
        filters,
        [
            "off",
            "error",
            "warn",
            "warn,rdeps=info",
            "warn,rdeps=debug",
            "warn,rdeps=trace",
            "trace",
        ]
    );
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(config.show_timestamps());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_from_global() {
    let global = GlobalConfig {
        output_log_level: LogLevel::DEBUG,
        file_log_level: LogLevel::WARN,
        log_file: Some(PathBuf::from("logs/rdeps.log")),
        ..GlobalConfig::default()
    };
    let config = LogConfig::from_global(&global);

    assert_eq!(config.console_level(), LogLevel::DEBUG);
    assert_eq!(config.file_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some(Path::new("logs/rdeps.log")));
}
