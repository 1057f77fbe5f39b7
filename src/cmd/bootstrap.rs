// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bootstrap command: wires the real toolchain into the pipeline.

use std::sync::Arc;

use crate::backend::{ProcessBackend, ProcessCloner};
use crate::cache::PathResolver;
use crate::config::Config;
use crate::error::GENERIC_FAILURE;
use crate::orchestrator::Orchestrator;

/// Builds the process-backed orchestrator for `config`.
///
/// # Errors
///
/// Returns an error if the workspace root cannot be determined.
pub fn process_orchestrator(
    config: Config,
) -> crate::error::Result<Orchestrator<ProcessCloner, ProcessBackend>> {
    let workspace = config.paths.workspace_root()?;
    let resolver = PathResolver::from_env().with_cache_dir(config.deps.cache_dir.as_str());
    let cloner = ProcessCloner::new(&config.tools.git);
    Ok(Orchestrator::new(
        Arc::new(config),
        resolver,
        workspace,
        cloner,
        ProcessBackend,
    ))
}

/// Main handler: runs the pipeline and returns the process exit code.
pub async fn run_bootstrap_command(target: Option<&str>, config: Config) -> u8 {
    let orchestrator = match process_orchestrator(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return GENERIC_FAILURE;
        }
    };
    tracing::debug!(workspace = %orchestrator.workspace().display(), "Workspace");

    match orchestrator.run(target).await {
        Ok(report) => {
            tracing::info!(target = %report.target, "Bootstrap completed successfully");
            0
        }
        Err(e) => {
            eprintln!("{} failed: {e}", e.stage());
            e.exit_code()
        }
    }
}
