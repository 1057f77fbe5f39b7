// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Idempotent dependency fetching.
//!
//! ```text
//! destination exists? --yes--> Cached
//!        |
//!        no
//!        v
//! remove stale {root}/.{name}.partial
//!        v
//! clone --recursive url -> staging --exit != 0--> CloneFailed
//!        | exit 0
//!        v
//! rename staging -> destination --> Fetched
//! ```
//!
//! Existence alone marks a cache hit; a directory is never inspected for
//! completeness. Promotion by rename keeps interrupted clones out of the
//! destination.


use std::io;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::backend::Cloner;
use crate::cache::DependencySpec;
use crate::error::FetchError;

/// Outcome of [`DependencyFetcher::ensure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Destination already existed; nothing ran.
    Cached,
    /// Dependency was cloned and promoted.
    Fetched,
    /// Dry run; the clone was only reported.
    Skipped,
}

/// Ensures dependencies exist in the cache, cloning missing ones.
#[derive(Debug, Clone)]
pub struct DependencyFetcher<C> {
    cloner: C,
    dry_run: bool,
}

impl<C: Cloner> DependencyFetcher<C> {
    pub const fn new(cloner: C) -> Self {
        Self {
            cloner,
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Makes sure `spec.destination()` exists.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the clone cannot start, exits non-zero, or
    /// the staging directory cannot be prepared or promoted.
    pub async fn ensure(&self, spec: &DependencySpec) -> Result<FetchStatus, FetchError> {
        let destination = spec.destination();
        if path_exists(destination) {
            debug!(name = spec.name(), path = %destination.display(), "Cached");
            return Ok(FetchStatus::Cached);
        }

        if self.dry_run {
            info!(
                name = spec.name(),
                url = spec.source_url(),
                "[dry-run] Would clone into {}",
                destination.display()
            );
            return Ok(FetchStatus::Skipped);
        }

        let staging = spec.staging_path();
        prepare_staging(spec, &staging)?;

        info!(name = spec.name(), url = spec.source_url(), "Cloning");
        let exit_code = self
            .cloner
            .clone_recursive(spec.source_url(), &staging)
            .await
            .map_err(|e| FetchError::Launch {
                name: spec.name().to_string(),
                url: spec.source_url().to_string(),
                message: format!("{e:#}"),
            })?;

        if exit_code != 0 {
            error!(name = spec.name(), exit_code, "Clone failed");
            discard_staging(&staging);
            return Err(FetchError::CloneFailed {
                name: spec.name().to_string(),
                url: spec.source_url().to_string(),
                exit_code,
            });
        }

        std::fs::rename(&staging, destination).map_err(|source| FetchError::Staging {
            name: spec.name().to_string(),
            path: destination.to_path_buf(),
            source,
        })?;
        info!(name = spec.name(), path = %destination.display(), "Fetched");
        Ok(FetchStatus::Fetched)
    }
}

/// Existence check that also counts dangling symlinks.
fn path_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

fn prepare_staging(spec: &DependencySpec, staging: &Path) -> Result<(), FetchError> {
    let staging_error = |source: io::Error| FetchError::Staging {
        name: spec.name().to_string(),
        path: staging.to_path_buf(),
        source,
    };

    if path_exists(staging) {
        warn!(path = %staging.display(), "Removing leftover partial clone");
        remove_path(staging).map_err(staging_error)?;
    }
    if let Some(parent) = staging.parent() {
        std::fs::create_dir_all(parent).map_err(staging_error)?;
    }
    Ok(())
}

fn discard_staging(staging: &Path) {
    if path_exists(staging)
        && let Err(e) = remove_path(staging)
    {
        debug!(path = %staging.display(), error = %e, "Could not remove partial clone");
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    if std::fs::symlink_metadata(path)?.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}
