// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::fake::CLONE_MARKER;
use super::*;

#[test]
fn test_invocation_command_line() {
    let invocation = Invocation::new("cargo", "/ws").args(["install", "cargo-lipo"]);

    insta::assert_snapshot!(invocation.command_line(), @"cargo install cargo-lipo");
    assert_eq!(invocation.cwd(), Path::new("/ws"));
    assert_eq!(invocation.args_slice(), ["install", "cargo-lipo"]);
}

#[tokio::test]
async fn test_recording_cloner_creates_destination() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("soil2");
    let cloner = RecordingCloner::new();

    let code = cloner
        .clone_recursive("https://example.invalid/soil2", &dest)
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read_to_string(dest.join(CLONE_MARKER)).unwrap(),
        "https://example.invalid/soil2"
    );
    assert_eq!(
        cloner.calls(),
        vec![CloneCall {
            url: "https://example.invalid/soil2".to_string(),
            destination: dest,
        }]
    );
}

#[tokio::test]
async fn test_recording_cloner_failure_leaves_partial_directory() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tools");
    let cloner = RecordingCloner::new().fail_url("u/tools", 128);

    let code = cloner.clone_recursive("u/tools", &dest).await.unwrap();

    assert_eq!(code, 128);
    assert!(dest.is_dir());
    assert!(!dest.join(CLONE_MARKER).exists());
}

#[tokio::test]
async fn test_recording_cloner_shares_state_between_clones() {
    let dir = tempfile::tempdir().unwrap();
    let cloner = RecordingCloner::new();
    let observer = cloner.clone();

    cloner
        .clone_recursive("u/a", &dir.path().join("a"))
        .await
        .unwrap();

    assert_eq!(observer.calls().len(), 1);
}

#[tokio::test]
async fn test_recording_cloner_unlaunchable() {
    let dir = tempfile::tempdir().unwrap();
    let cloner = RecordingCloner::new().unlaunchable();

    let result = cloner.clone_recursive("u/a", &dir.path().join("a")).await;

    assert!(result.is_err());
    assert!(cloner.calls().is_empty());
    assert!(!dir.path().join("a").exists());
}

#[tokio::test]
async fn test_recording_backend_exit_codes() {
    let backend = RecordingBackend::new().fail_on_args(["lipo"], 101);
    let install = Invocation::new("cargo", "/ws").args(["install", "cargo-lipo"]);
    let lipo = Invocation::new("cargo", "/ws").arg("lipo");

    assert_eq!(backend.execute(&install).await.unwrap(), 0);
    assert_eq!(backend.execute(&lipo).await.unwrap(), 101);
    assert_eq!(backend.calls(), vec![install, lipo]);
}

#[tokio::test]
async fn test_recording_backend_unlaunchable() {
    let backend = RecordingBackend::new().unlaunchable("xcodebuild");
    let invocation = Invocation::new("xcodebuild", "/ws").arg("build");

    let err = backend.execute(&invocation).await.unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"executable not found: 'xcodebuild' (not in PATH)");
    assert!(backend.calls().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_backend_reports_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let invocation = Invocation::new("/bin/sh", dir.path()).args(["-c", "exit 7"]);

    let code = ProcessBackend.execute(&invocation).await.unwrap();

    assert_eq!(code, 7);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_backend_runs_in_invocation_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let invocation =
        Invocation::new("/bin/sh", dir.path()).args(["-c", "touch ran-here"]);

    let code = ProcessBackend.execute(&invocation).await.unwrap();

    assert_eq!(code, 0);
    assert!(dir.path().join("ran-here").exists());
}

#[tokio::test]
async fn test_process_backend_missing_program() {
    let invocation = Invocation::new("nonexistent_program_12345", ".");

    assert!(ProcessBackend.execute(&invocation).await.is_err());
}

#[tokio::test]
async fn test_process_cloner_missing_git() {
    let dir = tempfile::tempdir().unwrap();
    let cloner = ProcessCloner::new("nonexistent_git_12345");

    let result = cloner
        .clone_recursive("https://example.invalid/x", &dir.path().join("x"))
        .await;

    assert!(result.is_err());
}

#[cfg(unix)]
fn git(args: &[&str], cwd: &Path) {
    let status = std::process::Command::new("git")
        .args(["-c", "user.name=rdeps", "-c", "user.email=rdeps@example.invalid"])
        .args(args)
        .current_dir(cwd)
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cloner_fetches_local_origin() {
    use crate::cache::CacheRoot;
    use crate::core::process::builder::ProcessBuilder;
    use crate::error::FetchError;
    use crate::fetch::{DependencyFetcher, FetchStatus};

    if ProcessBuilder::find("git").is_none() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let origins = dir.path().join("origins");
    let origin = origins.join("soil2");
    std::fs::create_dir_all(&origin).unwrap();
    git(&["init", "-q"], &origin);
    std::fs::write(origin.join("lib.rs"), "// soil2\n").unwrap();
    git(&["add", "lib.rs"], &origin);
    git(&["commit", "-q", "-m", "init"], &origin);

    let root = CacheRoot::new(dir.path().join("home/.rdeps"));
    let specs = root.dependencies(&format!("{}/", origins.display()));
    let fetcher = DependencyFetcher::new(ProcessCloner::default());

    assert_eq!(fetcher.ensure(&specs[0]).await.unwrap(), FetchStatus::Fetched);
    assert_eq!(
        std::fs::read_to_string(specs[0].destination().join("lib.rs")).unwrap(),
        "// soil2\n"
    );
    assert!(!specs[0].staging_path().exists());
    assert_eq!(fetcher.ensure(&specs[0]).await.unwrap(), FetchStatus::Cached);

    let err = fetcher.ensure(&specs[1]).await.unwrap_err();
    assert!(matches!(err, FetchError::CloneFailed { exit_code: 128, .. }));
    let mut left: Vec<_> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    left.sort();
    assert_eq!(left, ["soil2"]);
}
