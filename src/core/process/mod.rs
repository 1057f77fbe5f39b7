// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("cargo")
//!   .args() .cwd() .flag(ALLOW_FAILURE)
//!   .run()
//!       --> tokio::process::Command (kill_on_drop)
//!           stdout/stderr lines: echoed, traced, kept
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
