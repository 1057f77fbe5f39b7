// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recording capabilities that simulate the toolchain.
//!
//! Clones share their state between copies, so a test can hand one copy to
//! the orchestrator and inspect the calls through another.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use futures_util::future::BoxFuture;

use super::{Backend, Cloner, Invocation};
use crate::error::Result;

/// Marker file written into simulated clones.
pub const CLONE_MARKER: &str = "CLONED_FROM";

/// One recorded clone request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCall {
    pub url: String,
    pub destination: PathBuf,
}

#[derive(Debug, Default)]
struct ClonerState {
    calls: Vec<CloneCall>,
    failures: BTreeMap<String, i32>,
    unlaunchable: bool,
}

/// Cloner that records requests and creates the destination directory.
///
/// A successful clone creates `destination/CLONED_FROM` containing the URL.
/// A failing clone leaves a partially populated `destination` behind, like an
/// interrupted `git clone` would.
#[derive(Debug, Clone, Default)]
pub struct RecordingCloner {
    state: Arc<Mutex<ClonerState>>,
}

impl RecordingCloner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes clones of `url` exit with `exit_code`.
    #[must_use]
    pub fn fail_url(self, url: impl Into<String>, exit_code: i32) -> Self {
        self.lock().failures.insert(url.into(), exit_code);
        self
    }

    /// Makes every clone fail to start.
    #[must_use]
    pub fn unlaunchable(self) -> Self {
        self.lock().unlaunchable = true;
        self
    }

    /// Returns the clone requests seen so far.
    #[must_use]
    pub fn calls(&self) -> Vec<CloneCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ClonerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Cloner for RecordingCloner {
    fn clone_recursive<'a>(
        &'a self,
        url: &'a str,
        destination: &'a Path,
    ) -> BoxFuture<'a, Result<i32>> {
        Box::pin(async move {
            let failure = {
                let mut state = self.lock();
                if state.unlaunchable {
                    anyhow::bail!("executable not found: 'git' (not in PATH)");
                }
                state.calls.push(CloneCall {
                    url: url.to_string(),
                    destination: destination.to_path_buf(),
                });
                state.failures.get(url).copied()
            };

            std::fs::create_dir_all(destination)
                .with_context(|| format!("failed to create {}", destination.display()))?;
            if let Some(exit_code) = failure {
                std::fs::write(destination.join(".partial"), url)?;
                return Ok(exit_code);
            }
            std::fs::write(destination.join(CLONE_MARKER), url)?;
            Ok(0)
        })
    }
}

#[derive(Debug, Default)]
struct BackendState {
    calls: Vec<Invocation>,
    failures: Vec<(Vec<String>, i32)>,
    unlaunchable: Vec<PathBuf>,
}

/// Backend that records invocations and simulates exit codes.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    state: Arc<Mutex<BackendState>>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes invocations with exactly these arguments exit with `exit_code`.
    #[must_use]
    pub fn fail_on_args<I, S>(self, args: I, exit_code: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.lock().failures.push((args, exit_code));
        self
    }

    /// Makes invocations of `program` fail to start.
    #[must_use]
    pub fn unlaunchable(self, program: impl AsRef<Path>) -> Self {
        self.lock()
            .unlaunchable
            .push(program.as_ref().to_path_buf());
        self
    }

    /// Returns the invocations executed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for RecordingBackend {
    fn execute<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32>> {
        Box::pin(async move {
            let mut state = self.lock();
            if state
                .unlaunchable
                .iter()
                .any(|p| p.as_path() == invocation.program())
            {
                anyhow::bail!(
                    "executable not found: '{}' (not in PATH)",
                    invocation.program().display()
                );
            }
            state.calls.push(invocation.clone());
            let exit_code = state
                .failures
                .iter()
                .find(|(args, _)| args.as_slice() == invocation.args_slice())
                .map_or(0, |(_, code)| *code);
            Ok(exit_code)
        })
    }
}
