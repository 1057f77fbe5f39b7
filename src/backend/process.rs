// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process-backed capabilities.
//!
//! git and cargo output is echoed to the terminal and recorded as `trace!`
//! events, so a `--log-file` run keeps it.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::debug;

use super::{Backend, Cloner, Invocation};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::Result;

/// Clones with the `git` command line.
#[derive(Debug, Clone)]
pub struct ProcessCloner {
    git: PathBuf,
}

impl ProcessCloner {
    /// Creates a cloner using the given git executable (name or path).
    pub fn new(git: impl AsRef<Path>) -> Self {
        Self {
            git: git.as_ref().to_path_buf(),
        }
    }
}

impl Default for ProcessCloner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Cloner for ProcessCloner {
    fn clone_recursive<'a>(
        &'a self,
        url: &'a str,
        destination: &'a Path,
    ) -> BoxFuture<'a, Result<i32>> {
        Box::pin(async move {
            let output = ProcessBuilder::resolve(&self.git)?
                .arg("clone")
                .arg("--recursive")
                .arg(url)
                .arg(destination)
                .name("git")
                .flag(ProcessFlags::ALLOW_FAILURE)
                .run()
                .await?;
            debug!(url, exit_code = output.exit_code(), "git clone finished");
            Ok(output.exit_code())
        })
    }
}

/// Runs invocations as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBackend;

impl Backend for ProcessBackend {
    fn execute<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32>> {
        Box::pin(async move {
            let output = ProcessBuilder::resolve(invocation.program())?
                .args(invocation.args_slice())
                .cwd(invocation.cwd())
                .flag(ProcessFlags::ALLOW_FAILURE)
                .run()
                .await?;
            Ok(output.exit_code())
        })
    }
}
