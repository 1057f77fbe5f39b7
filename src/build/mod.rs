// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build dispatch.
//!
//! [`BuildDispatcher`] runs a [`BuildPlan`] through a [`Backend`] and stops
//! at the first failing step. See [`plan`] for the step tables.

pub mod plan;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::backend::{Backend, Invocation};
use crate::config::Config;
use crate::error::BuildError;
use crate::platform::PlatformTarget;

pub use plan::{BuildPlan, BuildStep, PlannedStep, StepAction};

/// Result of dispatching a build.
pub type BuildOutcome = Result<(), BuildError>;

/// Runs build plans.
#[derive(Debug, Clone)]
pub struct BuildDispatcher<B> {
    backend: B,
    config: Arc<Config>,
    workspace: PathBuf,
    dry_run: bool,
}

impl<B: Backend> BuildDispatcher<B> {
    pub fn new(backend: B, config: Arc<Config>, workspace: impl Into<PathBuf>) -> Self {
        let dry_run = config.global.dry;
        Self {
            backend,
            config,
            workspace: workspace.into(),
            dry_run,
        }
    }

    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Returns the plan [`dispatch`](Self::dispatch) would run.
    #[must_use]
    pub fn plan(&self, target: PlatformTarget) -> BuildPlan {
        BuildPlan::for_target(target, &self.config, &self.workspace)
    }

    /// Runs every step for `target` in order.
    ///
    /// # Errors
    ///
    /// Returns the [`BuildError`] of the first failing step; later steps do
    /// not run.
    pub async fn dispatch(&self, target: PlatformTarget) -> BuildOutcome {
        let plan = self.plan(target);
        info!(target = %plan.target(), steps = plan.steps().len(), "Building");

        for planned in plan.steps() {
            self.run_step(planned).await?;
        }

        info!(target = %plan.target(), "Build finished");
        Ok(())
    }

    async fn run_step(&self, planned: &PlannedStep) -> BuildOutcome {
        let step = planned.step();
        match planned.action() {
            StepAction::EnterDirectory(path) => {
                if !path.is_dir() {
                    if self.dry_run {
                        warn!(step = %step, path = %path.display(), "[dry-run] Missing directory");
                        return Ok(());
                    }
                    error!(step = %step, path = %path.display(), "Missing directory");
                    return Err(BuildError::MissingDirectory {
                        step,
                        path: path.clone(),
                    });
                }
                debug!(step = %step, path = %path.display(), "Entering");
                Ok(())
            }
            StepAction::Run(invocations) => {
                for invocation in invocations {
                    self.execute(step, invocation).await?;
                }
                Ok(())
            }
        }
    }

    async fn execute(&self, step: BuildStep, invocation: &Invocation) -> BuildOutcome {
        if self.dry_run {
            info!(
                step = %step,
                cwd = %invocation.cwd().display(),
                "[dry-run] Would run: {}",
                invocation.command_line()
            );
            return Ok(());
        }

        info!(step = %step, "{}", invocation.command_line());
        let exit_code = self
            .backend
            .execute(invocation)
            .await
            .map_err(|e| BuildError::Launch {
                step,
                message: format!("{e:#}"),
            })?;

        if exit_code != 0 {
            error!(step = %step, exit_code, "Step failed");
            return Err(BuildError::StepFailed { step, exit_code });
        }
        Ok(())
    }
}
