// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process description.
//!
//! ```text
//! ProcessBuilder
//!  • new / which / resolve          program
//!  • arg / args / cwd / name        invocation
//!  • flag(ALLOW_FAILURE)            exit handling
//! ```
//!
//! stdout and stderr are always piped: every line is echoed to the matching
//! stream of this process, emitted as a `trace!` event and kept in
//! [`ProcessOutput`].

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use bitflags::bitflags;

use crate::error::ProcessError;

/// Programs already located on PATH, keyed by bare name.
static PATH_LOOKUPS: LazyLock<Mutex<HashMap<String, PathBuf>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

bitflags! {
    /// Exit handling flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Hand back non-zero exit codes instead of turning them into errors
        const ALLOW_FAILURE = 1;
    }
}

/// Exit code and captured streams of a finished child.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Exit code, or -1 when the child was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A child process waiting to be run.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    flags: ProcessFlags,
    name: Option<String>,
}

impl ProcessBuilder {
    /// Describes `program` as given. Bare names are looked up by the OS at
    /// spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            flags: ProcessFlags::empty(),
            name: None,
        }
    }

    /// Locates `program` on PATH first.
    ///
    /// # Errors
    ///
    /// `ProcessError::ExecutableNotFound` when PATH has no such program.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        match Self::find(program) {
            Some(path) => Ok(Self::new(path)),
            None => Err(ProcessError::ExecutableNotFound {
                name: program.to_string(),
            }),
        }
    }

    /// Accepts a configured tool location: a bare name like `git` goes
    /// through [`which`](Self::which), a path is kept as is.
    ///
    /// # Errors
    ///
    /// `ProcessError::ExecutableNotFound` when a bare name is not on PATH.
    pub fn resolve(program: &Path) -> Result<Self, ProcessError> {
        let mut components = program.components();
        if let (Some(Component::Normal(name)), None) = (components.next(), components.next()) {
            return Self::which(&name.to_string_lossy());
        }
        Ok(Self::new(program))
    }

    /// Full path of `program` on PATH. Hits are remembered for the rest of
    /// the run.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let mut lookups = PATH_LOOKUPS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = lookups.get(program) {
            return Some(path.clone());
        }
        let path = which::which(program).ok()?;
        lookups.insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, |builder, arg| builder.arg(arg))
    }

    /// Working directory of the child only.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Label used in log events and error messages instead of the file stem.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(super) const fn process_flags(&self) -> ProcessFlags {
        self.flags
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
