// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace link to the dependency cache.
//!
//! ```text
//! {workspace}/.rdeps  -->  {home}/.rdeps/
//! ```
//!
//! The link is attempted once. Anything already at the link path (a correct
//! link, a stale link, a regular file) is left untouched.

#[cfg(test)]
mod tests;

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::CacheRoot;
use crate::error::LinkError;

/// Default link name inside the workspace.
pub const DEFAULT_LINK_NAME: &str = ".rdeps";

/// Outcome of [`WorkspaceLinker::link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Created,
    AlreadyPresent,
    Skipped,
}

/// Creates the workspace link.
#[derive(Debug, Clone)]
pub struct WorkspaceLinker {
    link_name: String,
    dry_run: bool,
}

impl Default for WorkspaceLinker {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_NAME)
    }
}

impl WorkspaceLinker {
    pub fn new(link_name: impl Into<String>) -> Self {
        Self {
            link_name: link_name.into(),
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the link path inside `workspace_root`.
    #[must_use]
    pub fn link_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.link_name)
    }

    /// Links `{workspace_root}/{link_name}` to the cache root.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::CreateFailed`] when the link cannot be created
    /// and nothing exists at the link path.
    pub fn link(
        &self,
        cache_root: &CacheRoot,
        workspace_root: &Path,
    ) -> Result<LinkStatus, LinkError> {
        let link_path = self.link_path(workspace_root);
        let target = cache_root.path();

        if self.dry_run {
            if std::fs::symlink_metadata(&link_path).is_ok() {
                return Ok(LinkStatus::AlreadyPresent);
            }
            info!(
                "[dry-run] Would link {} -> {}",
                link_path.display(),
                target.display()
            );
            return Ok(LinkStatus::Skipped);
        }

        match create_dir_link(target, &link_path) {
            Ok(()) => {
                info!(link = %link_path.display(), target = %target.display(), "Linked");
                Ok(LinkStatus::Created)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                report_existing(&link_path, target);
                Ok(LinkStatus::AlreadyPresent)
            }
            Err(source) => Err(LinkError::CreateFailed {
                path: link_path,
                target: target.to_path_buf(),
                source,
            }),
        }
    }
}

fn report_existing(link_path: &Path, target: &Path) {
    match std::fs::read_link(link_path) {
        Ok(current) if current == target => {
            debug!(link = %link_path.display(), "Link already present");
        }
        Ok(current) => warn!(
            link = %link_path.display(),
            current = %current.display(),
            expected = %target.display(),
            "Existing link points elsewhere; leaving it"
        ),
        Err(_) => warn!(
            path = %link_path.display(),
            "Path exists and is not a link; leaving it"
        ),
    }
}

#[cfg(unix)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
