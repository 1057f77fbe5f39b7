// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for rdeps.
//!
//! ```text
//! Config: GlobalConfig, DepsConfig, ToolsConfig, IosConfig, PathsConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CACHE_DIR;
use crate::error::ConfigError;
use crate::link::DEFAULT_LINK_NAME;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log intended actions without touching the filesystem or spawning processes.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file, no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Dependency cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepsConfig {
    /// Prefix joined with each dependency name to form its clone URL.
    pub url_base: String,
    /// Cache directory name under the home directory.
    pub cache_dir: String,
    /// Name of the link created in the workspace.
    pub link_name: String,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            url_base: "https://github.com/vladasz/".to_string(),
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
            link_name: DEFAULT_LINK_NAME.to_string(),
        }
    }
}

impl DepsConfig {
    /// Checks that the cache and link names are single, non-empty path components.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_base.is_empty() {
            return Err(invalid("deps", "url_base", "must not be empty"));
        }
        for (key, value) in [("cache_dir", &self.cache_dir), ("link_name", &self.link_name)] {
            if value.is_empty() {
                return Err(invalid("deps", key, "must not be empty"));
            }
            if value.contains(['/', '\\']) || matches!(value.as_str(), "." | "..") {
                return Err(invalid(
                    "deps",
                    key,
                    &format!("expected a single directory name, got '{value}'"),
                ));
            }
        }
        Ok(())
    }
}

/// External tool locations.
///
/// Bare names are looked up in PATH; anything with a separator is used as is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git, used for recursive clones.
    pub git: PathBuf,
    /// Cargo, the build backend.
    pub cargo: PathBuf,
    /// Rustup, registers cross-compilation targets.
    pub rustup: PathBuf,
    /// Xcode command line build tool.
    pub xcodebuild: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            cargo: PathBuf::from("cargo"),
            rustup: PathBuf::from("rustup"),
            xcodebuild: PathBuf::from("xcodebuild"),
        }
    }
}

/// iOS cross-build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IosConfig {
    /// Rust targets registered before the universal build.
    pub targets: Vec<String>,
    /// Cargo subcommand crate producing the universal static library.
    pub packaging_helper: String,
    /// Mobile project directory, relative to the workspace root.
    pub project_dir: PathBuf,
    /// SDK passed to `xcodebuild -sdk`.
    pub sdk: String,
    /// Scheme passed to `xcodebuild -scheme`.
    pub scheme: String,
    /// List installed SDKs before building.
    pub show_sdks: bool,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "aarch64-apple-ios".to_string(),
                "x86_64-apple-ios".to_string(),
            ],
            packaging_helper: "cargo-lipo".to_string(),
            project_dir: PathBuf::from("mobile/iOS"),
            sdk: "iphonesimulator".to_string(),
            scheme: "TestEngine".to_string(),
            show_sdks: true,
        }
    }
}

impl IosConfig {
    /// Returns the cargo subcommand provided by the packaging helper.
    ///
    /// `cargo-lipo` installs the `cargo lipo` subcommand.
    #[must_use]
    pub fn packaging_subcommand(&self) -> &str {
        self.packaging_helper
            .strip_prefix("cargo-")
            .unwrap_or(&self.packaging_helper)
    }

    /// Checks that the fields needed to build a plan are present.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(invalid("ios", "targets", "at least one target is required"));
        }
        if self.packaging_helper.is_empty() {
            return Err(invalid("ios", "packaging_helper", "must not be empty"));
        }
        if self.scheme.is_empty() {
            return Err(invalid("ios", "scheme", "must not be empty"));
        }
        if self.project_dir.is_absolute() || self.project_dir == Path::new("") {
            return Err(invalid(
                "ios",
                "project_dir",
                "expected a path relative to the workspace",
            ));
        }
        Ok(())
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
