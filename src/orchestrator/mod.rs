// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The bootstrap pipeline.
//!
//! ```text
//! resolve cache root
//!        |
//!        v
//! ensure soil2 --> ensure tools --> ensure gles31-sys     (sequential)
//!        |
//!        v
//! link {workspace}/.rdeps -> cache root
//!        |
//!        v
//! dispatch build for the selected target
//! ```
//!
//! Stages run strictly in this order and the first error ends the run.


use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::backend::{Backend, Cloner};
use crate::build::BuildDispatcher;
use crate::cache::{CacheRoot, PathResolver};
use crate::config::Config;
use crate::error::PipelineResult;
use crate::fetch::{DependencyFetcher, FetchStatus};
use crate::link::WorkspaceLinker;
use crate::platform::PlatformTarget;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub target: PlatformTarget,
    pub cache_root: CacheRoot,
    pub fetched: Vec<(String, FetchStatus)>,
}

/// Drives resolve, fetch, link and build.
#[derive(Debug)]
pub struct Orchestrator<C, B> {
    resolver: PathResolver,
    url_base: String,
    workspace: PathBuf,
    fetcher: DependencyFetcher<C>,
    linker: WorkspaceLinker,
    dispatcher: BuildDispatcher<B>,
}

impl<C: Cloner, B: Backend> Orchestrator<C, B> {
    /// Wires the stages from `config`.
    ///
    /// `resolver` should already carry the configured cache directory.
    pub fn new(
        config: Arc<Config>,
        resolver: PathResolver,
        workspace: impl Into<PathBuf>,
        cloner: C,
        backend: B,
    ) -> Self {
        let workspace = workspace.into();
        let dry_run = config.global.dry;
        Self {
            resolver,
            url_base: config.deps.url_base.clone(),
            fetcher: DependencyFetcher::new(cloner).with_dry_run(dry_run),
            linker: WorkspaceLinker::new(config.deps.link_name.as_str()).with_dry_run(dry_run),
            dispatcher: BuildDispatcher::new(backend, config, workspace.clone()),
            workspace,
        }
    }

    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Runs the pipeline for an optional target token.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; see [`PipelineError`](crate::error::PipelineError).
    pub async fn run(&self, target_token: Option<&str>) -> PipelineResult<RunReport> {
        self.run_target(PlatformTarget::select(target_token)).await
    }

    /// Runs the pipeline for an explicit target.
    ///
    /// # Errors
    ///
    /// Returns the first stage error.
    pub async fn run_target(&self, target: PlatformTarget) -> PipelineResult<RunReport> {
        let cache_root = self.resolver.resolve_cache_root()?;
        info!(cache = %cache_root.path().display(), target = %target, "Starting");

        let mut fetched = Vec::new();
        for spec in cache_root.dependencies(&self.url_base) {
            let status = self.fetcher.ensure(&spec).await?;
            fetched.push((spec.name().to_string(), status));
        }

        self.linker.link(&cache_root, &self.workspace)?;
        self.dispatcher.dispatch(target).await?;

        Ok(RunReport {
            target,
            cache_root,
            fetched,
        })
    }
}
