// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            PipelineError (16 bytes)
//!                     |
//!     +----------+----+-----+---------+
//!     |          |          |         |
//!     v          v          v         v
//! Environment  Fetch      Link      Build
//!     Box       Box        Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Environment HomeNotFound
//!   Fetch       CloneFailed, Launch, Staging
//!   Link        CreateFailed
//!   Build       StepFailed, Launch, MissingDirectory
//!
//! Outside the pipeline:
//!   Config      InvalidValue
//!   Process     ExecutableNotFound, SpawnFailed
//! ```
//!
//! Every pipeline error is fatal. [`PipelineError::exit_code`] maps it to the
//! process exit status: the failing subprocess's code where one exists,
//! [`GENERIC_FAILURE`] otherwise.

use std::path::PathBuf;

use thiserror::Error;

use crate::build::BuildStep;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PipelineError`].
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Exit code used when no subprocess exit status is available.
pub const GENERIC_FAILURE: u8 = 1;

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Fetch,
    Link,
    Build,
}

impl Stage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Fetch => "fetch",
            Self::Link => "link",
            Self::Build => "build",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level pipeline error.
///
/// All sub-errors are boxed to keep this enum at pointer size plus tag.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Home directory could not be determined.
    #[error("environment error: {0}")]
    Environment(Box<EnvironmentError>),

    /// A dependency could not be fetched.
    #[error("fetch error: {0}")]
    Fetch(Box<FetchError>),

    /// The workspace link could not be created.
    #[error("link error: {0}")]
    Link(Box<LinkError>),

    /// A backend build step failed.
    #[error("build error: {0}")]
    Build(Box<BuildError>),
}

impl PipelineError {
    /// Returns the stage that failed.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Environment(_) => Stage::Resolve,
            Self::Fetch(_) => Stage::Fetch,
            Self::Link(_) => Stage::Link,
            Self::Build(_) => Stage::Build,
        }
    }

    /// Returns the process exit code for this failure.
    ///
    /// Subprocess exit codes are propagated when they fit in `1..=255`;
    /// everything else (signals, launch failures, filesystem errors) maps to
    /// [`GENERIC_FAILURE`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        let code = match self {
            Self::Fetch(e) => e.exit_code(),
            Self::Build(e) => e.exit_code(),
            Self::Environment(_) | Self::Link(_) => None,
        };
        code.map_or(GENERIC_FAILURE, exit_code_from)
    }
}

/// Clamps a subprocess exit code to a non-zero process exit status.
#[must_use]
pub fn exit_code_from(code: i32) -> u8 {
    u8::try_from(code)
        .ok()
        .filter(|c| *c != 0)
        .unwrap_or(GENERIC_FAILURE)
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PipelineError {
                fn from(err: $error) -> Self {
                    PipelineError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvironmentError => Environment,
    FetchError => Fetch,
    LinkError => Link,
    BuildError => Build,
}

// --- Environment Errors ---

/// Errors raised while inspecting the environment.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// Neither `HOME` nor the platform lookup produced a home directory.
    #[error("cannot determine home directory (HOME is unset and no platform fallback succeeded)")]
    HomeNotFound,
}

// --- Fetch Errors ---

/// Dependency fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The clone subprocess exited with a non-zero status.
    #[error("failed to clone {name} from {url}: exited with code {exit_code}")]
    CloneFailed {
        name: String,
        url: String,
        exit_code: i32,
    },

    /// The clone subprocess could not be started.
    #[error("failed to clone {name} from {url}: {message}")]
    Launch {
        name: String,
        url: String,
        message: String,
    },

    /// The staging directory could not be prepared or promoted.
    #[error("failed to prepare '{path}' for {name}: {source}")]
    Staging {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Returns the clone exit code, if the clone ran.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CloneFailed { exit_code, .. } => Some(*exit_code),
            Self::Launch { .. } | Self::Staging { .. } => None,
        }
    }
}

// --- Link Errors ---

/// Workspace link errors.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Creating the symbolic link failed for a reason other than "already exists".
    #[error("failed to link '{path}' -> '{target}': {source}")]
    CreateFailed {
        path: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Build Errors ---

/// Backend build errors. Each variant names the first step that failed.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A step's process exited with a non-zero status.
    #[error("step '{step}' exited with code {exit_code}")]
    StepFailed { step: BuildStep, exit_code: i32 },

    /// A step's process could not be started.
    #[error("step '{step}' could not be started: {message}")]
    Launch { step: BuildStep, message: String },

    /// A step's working directory does not exist.
    #[error("step '{step}' failed: '{path}' is not a directory")]
    MissingDirectory { step: BuildStep, path: PathBuf },
}

impl BuildError {
    /// Returns the step that failed.
    #[must_use]
    pub const fn step(&self) -> BuildStep {
        match self {
            Self::StepFailed { step, .. }
            | Self::Launch { step, .. }
            | Self::MissingDirectory { step, .. } => *step,
        }
    }

    /// Returns the failing process's exit code, if it ran.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::StepFailed { exit_code, .. } => Some(*exit_code),
            Self::Launch { .. } | Self::MissingDirectory { .. } => None,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
