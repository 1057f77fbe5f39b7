// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build target selection.
//!
//! ```text
//! token == "ios"  ->  IosCross
//! otherwise       ->  host OS (macos | windows | linux)
//! ```
//!
//! Only the exact token `ios` selects cross compilation. Any other token is
//! ignored and the host target is built.


use std::fmt;

/// Target token that selects the iOS cross build.
pub const IOS_TOKEN: &str = "ios";

/// Platform a build is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTarget {
    Linux,
    MacOs,
    Windows,
    IosCross,
}

impl PlatformTarget {
    /// Returns the target for the running host.
    #[must_use]
    pub fn host() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an OS name as reported by `std::env::consts::OS`.
    ///
    /// Unknown systems are treated as Linux.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Linux,
        }
    }

    /// Selects the target for an optional command-line token.
    #[must_use]
    pub fn select(token: Option<&str>) -> Self {
        Self::select_for_host(token, Self::host())
    }

    /// Like [`select`](Self::select) with an explicit host.
    #[must_use]
    pub fn select_for_host(token: Option<&str>, host: Self) -> Self {
        if token == Some(IOS_TOKEN) {
            Self::IosCross
        } else {
            host
        }
    }

    #[must_use]
    pub const fn is_cross(self) -> bool {
        matches!(self, Self::IosCross)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::IosCross => "ios",
        }
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
