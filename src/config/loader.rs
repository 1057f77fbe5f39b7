// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("rdeps.toml")   lowest
//!   .add_toml_file(--ini ...)
//!   .with_env_prefix("RDEPS")               RDEPS_SECTION__KEY
//!   .set(CLI overrides)                     highest
//!        |
//!        v
//!    build() --> Config (validated)
//! ```
//!
//! Sources added later override earlier ones. Environment variables are
//! applied after every file, and `set` overrides always win.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// Keys parsed as comma separated lists when read from the environment.
const ENV_LIST_KEYS: &[&str] = &["ios.targets"];

/// A configuration source recorded by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedSource {
    /// File that must exist (`--ini`).
    Required(PathBuf),
    /// File that was found and will be read.
    Optional(PathBuf),
    /// In-memory TOML.
    Inline,
}

impl fmt::Display for LoadedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <inline>"),
        }
    }
}

/// Builder for [`Config`] from files, environment and overrides.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<LoadedSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        self.add_file(path, true)
            .record(LoadedSource::Required(path.to_path_buf()))
    }

    /// Adds a TOML file that is skipped if missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let loader = self.add_file(path, false);
        if path.exists() {
            loader.record(LoadedSource::Optional(path.to_path_buf()))
        } else {
            loader
        }
    }

    /// Adds TOML content directly.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.record(LoadedSource::Inline)
    }

    /// Reads `{PREFIX}_{SECTION}__{KEY}` variables when building.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides a single key, e.g. `global.dry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key path is malformed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a value has the wrong type or an unknown key is present, or
    /// `Config::validate` rejects the merged values.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(env_source(prefix)),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the recorded sources in load order.
    #[must_use]
    pub fn loaded_files(&self) -> &[LoadedSource] {
        &self.sources
    }

    /// Returns numbered, printable source lines.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    fn record(mut self, source: LoadedSource) -> Self {
        self.sources.push(source);
        self
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn env_source(prefix: &str) -> Environment {
    ENV_LIST_KEYS.iter().fold(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}
