// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for rdeps.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. rdeps.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. RDEPS_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RDEPS_GLOBAL__DRY=true            → global.dry = true
//! RDEPS_DEPS__URL_BASE=https://..   → deps.url_base = "https://.."
//! RDEPS_IOS__TARGETS=a,b            → ios.targets = ["a", "b"]
//! RDEPS_PATHS__WORKSPACE=/src/game  → paths.workspace = "/src/game"
//! ```
//!
//! Sections and keys are separated by `__` so that keys containing
//! underscores survive.

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{DepsConfig, GlobalConfig, IosConfig, ToolsConfig};

/// Default file name of the optional local configuration.
pub const LOCAL_CONFIG_FILE: &str = "rdeps.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Dependency cache settings.
    pub deps: DepsConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// iOS cross-build settings.
    pub ios: IosConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rdeps::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("rdeps.toml")
    ///     .with_env_prefix("RDEPS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for the first invalid key.
    pub fn validate(&self) -> Result<()> {
        self.deps.validate()?;
        self.ios.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_deps_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_ios_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
    }

    fn format_deps_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("deps.url_base".into(), self.deps.url_base.clone());
        options.insert("deps.cache_dir".into(), self.deps.cache_dir.clone());
        options.insert("deps.link_name".into(), self.deps.link_name.clone());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.display().to_string());
        options.insert("tools.cargo".into(), self.tools.cargo.display().to_string());
        options.insert(
            "tools.rustup".into(),
            self.tools.rustup.display().to_string(),
        );
        options.insert(
            "tools.xcodebuild".into(),
            self.tools.xcodebuild.display().to_string(),
        );
    }

    fn format_ios_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("ios.targets".into(), self.ios.targets.join(","));
        options.insert(
            "ios.packaging_helper".into(),
            self.ios.packaging_helper.clone(),
        );
        options.insert(
            "ios.project_dir".into(),
            self.ios.project_dir.display().to_string(),
        );
        options.insert("ios.sdk".into(), self.ios.sdk.clone());
        options.insert("ios.scheme".into(), self.ios.scheme.clone());
        options.insert("ios.show_sdks".into(), self.ios.show_sdks.to_string());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.workspace".into(),
            self.paths
                .workspace
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }
}
