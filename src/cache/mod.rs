// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cache root resolution and the fixed dependency table.
//!
//! ```text
//! HOME (non-empty) ---+
//!                     +--> home --> {home}/.rdeps/ --> {root}/soil2
//! platform lookup ----+                             +-> {root}/tools
//!                                                   +-> {root}/gles31-sys
//! ```
//!
//! A dependency is cached when its destination path exists. Clones land in a
//! hidden staging sibling first, so an interrupted clone never looks cached.


use std::ffi::OsString;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::error::EnvironmentError;

/// Names of the repositories every build needs, in fetch order.
pub const DEPENDENCIES: [&str; 3] = ["soil2", "tools", "gles31-sys"];

/// Default cache directory name under the home directory.
pub const DEFAULT_CACHE_DIR: &str = ".rdeps";

/// Directory holding every fetched dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot(PathBuf);

impl CacheRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Returns where the dependency `name` lives.
    #[must_use]
    pub fn dependency_path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    /// True when `path` lies strictly below this root without `..` hops.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.strip_prefix(&self.0).is_ok_and(|rest| {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        })
    }

    /// Returns the fixed dependency table rooted here.
    #[must_use]
    pub fn dependencies(&self, url_base: &str) -> Vec<DependencySpec> {
        DEPENDENCIES
            .iter()
            .map(|name| {
                let spec = DependencySpec::new(
                    *name,
                    format!("{url_base}{name}"),
                    self.dependency_path(name),
                );
                debug_assert!(
                    self.contains(spec.destination()),
                    "{} escapes the cache root",
                    spec.destination().display()
                );
                spec
            })
            .collect()
    }
}

/// One repository to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    name: String,
    source_url: String,
    destination: PathBuf,
}

impl DependencySpec {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Returns the hidden sibling a clone is written to before promotion.
    ///
    /// For `{root}/tools` this is `{root}/.tools.partial`.
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        let file_name = format!(".{}.partial", self.name);
        self.destination
            .parent()
            .map_or_else(|| PathBuf::from(&file_name), |parent| parent.join(&file_name))
    }
}

/// Finds the home directory and derives the cache root from it.
///
/// `HOME` is consulted first; an unset or empty value falls through to the
/// platform lookup from the `dirs` crate.
#[derive(Debug, Clone)]
pub struct PathResolver {
    home: Option<OsString>,
    fallback: fn() -> Option<PathBuf>,
    cache_dir: String,
}

impl PathResolver {
    /// Creates a resolver reading `HOME` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_home(std::env::var_os("HOME"))
    }

    /// Creates a resolver with an explicit `HOME` value.
    #[must_use]
    pub fn with_home(home: Option<impl Into<OsString>>) -> Self {
        Self {
            home: home.map(Into::into),
            fallback: dirs::home_dir,
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
        }
    }

    /// Replaces the platform home lookup.
    #[must_use]
    pub fn with_fallback(mut self, fallback: fn() -> Option<PathBuf>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the cache directory name under home.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<String>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Returns the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::HomeNotFound`] if neither source yields a
    /// non-empty path.
    pub fn resolve_home(&self) -> Result<PathBuf, EnvironmentError> {
        self.home
            .as_ref()
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(|| (self.fallback)().filter(|home| !home.as_os_str().is_empty()))
            .ok_or(EnvironmentError::HomeNotFound)
    }

    /// Returns `{home}/{cache_dir}/`, with the trailing separator.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::HomeNotFound`] if home cannot be resolved.
    pub fn resolve_cache_root(&self) -> Result<CacheRoot, EnvironmentError> {
        let home = self.resolve_home()?;
        let dir = format!("{}{MAIN_SEPARATOR}", self.cache_dir);
        Ok(CacheRoot::new(home.join(dir)))
    }
}
