// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! workspace/          (paths.workspace, default: cwd)
//!   .rdeps  -> ~/.rdeps/
//!   mobile/iOS/       (ios.project_dir)
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Workspace path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root that receives the cache link and runs the build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
}

impl PathsConfig {
    /// Returns the workspace root, resolving relative paths against `base`.
    #[must_use]
    pub fn workspace_root_in(&self, base: &Path) -> PathBuf {
        match &self.workspace {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => base.join(p),
            None => base.to_path_buf(),
        }
    }

    /// Returns the workspace root, resolving relative paths against the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn workspace_root(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(self.workspace_root_in(&cwd))
    }
}
