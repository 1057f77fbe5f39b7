// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)        cmd (bootstrap)
//!                |                     |
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                      orchestrator
//!                            |
//!        +---------+---------+---------+---------+
//!        v         v         v         v         v
//!      cache     fetch      link     build    platform
//!    (resolve)  (clone)  (symlink)  (plans)  (target)
//!                  |                   |
//!                  +---------+---------+
//!                            v
//!                  backend  Cloner / Backend
//!                   process impls + fakes
//!
//!   +-----------------------------------------+
//!   |  core   process builder and runner      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod backend;
pub mod build;
pub mod cache;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod link;
pub mod logging;
pub mod orchestrator;
pub mod platform;
