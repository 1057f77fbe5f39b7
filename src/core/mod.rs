// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!     core
//!      |
//!      v
//!   process
//!      |
//!   Builder, Output
//! ```

pub mod process;
