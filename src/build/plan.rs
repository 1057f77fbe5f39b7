// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build plans per target.
//!
//! ```text
//! linux | macos | windows:
//!   1. native build                cargo build
//!
//! ios:
//!   1. register cross targets      rustup target add <targets..>
//!   2. install packaging helper    cargo install cargo-lipo
//!   3. produce universal artifact  cargo lipo
//!   4. enter mobile project        {workspace}/mobile/iOS must be a directory
//!   5. mobile sdk build            xcodebuild -showsdks
//!                                  xcodebuild -sdk iphonesimulator -scheme TestEngine build
//! ```
//!
//! Steps 1-3 run in the workspace root; step 5 runs in the mobile project.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::backend::Invocation;
use crate::config::Config;
use crate::platform::PlatformTarget;

/// A named build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    NativeBuild,
    RegisterCrossTargets,
    InstallPackagingHelper,
    ProduceUniversalArtifact,
    EnterMobileProject,
    MobileSdkBuild,
}

impl BuildStep {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NativeBuild => "native build",
            Self::RegisterCrossTargets => "register cross targets",
            Self::InstallPackagingHelper => "install packaging helper",
            Self::ProduceUniversalArtifact => "produce universal artifact",
            Self::EnterMobileProject => "enter mobile project",
            Self::MobileSdkBuild => "mobile sdk build",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run commands in order; the first non-zero exit fails the step.
    Run(Vec<Invocation>),
    /// Require the directory to exist before later steps use it.
    EnterDirectory(PathBuf),
}

/// A step with its resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    step: BuildStep,
    action: StepAction,
}

impl PlannedStep {
    #[must_use]
    pub const fn step(&self) -> BuildStep {
        self.step
    }

    #[must_use]
    pub const fn action(&self) -> &StepAction {
        &self.action
    }
}

/// Ordered steps for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    target: PlatformTarget,
    steps: Vec<PlannedStep>,
}

impl BuildPlan {
    /// Builds the plan for `target` with commands rooted at `workspace`.
    #[must_use]
    pub fn for_target(target: PlatformTarget, config: &Config, workspace: &Path) -> Self {
        let steps = if target.is_cross() {
            ios_steps(config, workspace)
        } else {
            native_steps(config, workspace)
        };
        Self { target, steps }
    }

    #[must_use]
    pub const fn target(&self) -> PlatformTarget {
        self.target
    }

    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Returns the step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<BuildStep> {
        self.steps.iter().map(PlannedStep::step).collect()
    }
}

fn run(step: BuildStep, invocations: Vec<Invocation>) -> PlannedStep {
    PlannedStep {
        step,
        action: StepAction::Run(invocations),
    }
}

fn native_steps(config: &Config, workspace: &Path) -> Vec<PlannedStep> {
    vec![run(
        BuildStep::NativeBuild,
        vec![Invocation::new(&config.tools.cargo, workspace).arg("build")],
    )]
}

fn ios_steps(config: &Config, workspace: &Path) -> Vec<PlannedStep> {
    let ios = &config.ios;
    let tools = &config.tools;
    let project = workspace.join(&ios.project_dir);

    let mut sdk_build = Vec::with_capacity(2);
    if ios.show_sdks {
        sdk_build.push(Invocation::new(&tools.xcodebuild, &project).arg("-showsdks"));
    }
    sdk_build.push(
        Invocation::new(&tools.xcodebuild, &project)
            .arg("-sdk")
            .arg(ios.sdk.as_str())
            .arg("-scheme")
            .arg(ios.scheme.as_str())
            .arg("build"),
    );

    vec![
        run(
            BuildStep::RegisterCrossTargets,
            vec![
                Invocation::new(&tools.rustup, workspace)
                    .args(["target", "add"])
                    .args(ios.targets.iter().cloned()),
            ],
        ),
        run(
            BuildStep::InstallPackagingHelper,
            vec![
                Invocation::new(&tools.cargo, workspace)
                    .arg("install")
                    .arg(ios.packaging_helper.as_str()),
            ],
        ),
        run(
            BuildStep::ProduceUniversalArtifact,
            vec![Invocation::new(&tools.cargo, workspace).arg(ios.packaging_subcommand())],
        ),
        PlannedStep {
            step: BuildStep::EnterMobileProject,
            action: StepAction::EnterDirectory(project),
        },
        run(BuildStep::MobileSdkBuild, sdk_build),
    ]
}
