// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Capability seams for the external toolchain.
//!
//! ```text
//! DependencyFetcher --> Cloner  --> ProcessCloner (git clone --recursive)
//!                               \-> RecordingCloner (tests)
//! BuildDispatcher   --> Backend --> ProcessBackend (cargo, rustup, xcodebuild)
//!                               \-> RecordingBackend (tests)
//! ```
//!
//! Both traits report the subprocess exit code as `Ok(code)`; `Err` means the
//! process could not be started at all. Interpreting a non-zero code is left
//! to the caller, which knows the step it belongs to.

pub mod fake;
pub mod process;

#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::error::Result;

pub use fake::{CloneCall, RecordingBackend, RecordingCloner};
pub use process::{ProcessBackend, ProcessCloner};

/// A single backend command with an explicit working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    cwd: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` running in `cwd`.
    pub fn new(program: impl AsRef<Path>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Returns the command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program.display().to_string();
        for arg in &self.args {
            let _ = write!(cmd, " {arg}");
        }
        cmd
    }
}

/// Fetches a repository into a path.
pub trait Cloner: Send + Sync {
    /// Recursively clones `url` into `destination` and returns the exit code.
    ///
    /// # Errors
    ///
    /// Returns an error only if the clone could not be started.
    fn clone_recursive<'a>(&'a self, url: &'a str, destination: &'a Path)
    -> BoxFuture<'a, Result<i32>>;
}

/// Runs build commands.
pub trait Backend: Send + Sync {
    /// Runs `invocation` to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be started.
    fn execute<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32>>;
}
