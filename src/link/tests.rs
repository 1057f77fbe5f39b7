// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[cfg(unix)]
#[test]
fn test_link_created() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("home/.rdeps/"));
    let workspace = dir.path().join("ws");
    std::fs::create_dir_all(cache.path()).unwrap();
    std::fs::create_dir_all(&workspace).unwrap();

    let status = WorkspaceLinker::default().link(&cache, &workspace).unwrap();

    assert_eq!(status, LinkStatus::Created);
    let link = workspace.join(".rdeps");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read_link(&link).unwrap(), cache.path());
}

#[cfg(unix)]
#[test]
fn test_link_created_before_target_exists() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("missing-cache"));

    let status = WorkspaceLinker::default().link(&cache, dir.path()).unwrap();

    assert_eq!(status, LinkStatus::Created);
}

#[cfg(unix)]
#[test]
fn test_second_link_is_already_present() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("cache"));
    let workspace = dir.path().join("ws");
    std::fs::create_dir_all(&workspace).unwrap();
    let linker = WorkspaceLinker::default();

    assert_eq!(linker.link(&cache, &workspace).unwrap(), LinkStatus::Created);
    assert_eq!(
        linker.link(&cache, &workspace).unwrap(),
        LinkStatus::AlreadyPresent
    );
}

#[cfg(unix)]
#[test]
fn test_stale_link_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("cache"));
    let elsewhere = dir.path().join("elsewhere");
    std::os::unix::fs::symlink(&elsewhere, dir.path().join(".rdeps")).unwrap();

    let status = WorkspaceLinker::default().link(&cache, dir.path()).unwrap();

    assert_eq!(status, LinkStatus::AlreadyPresent);
    assert_eq!(std::fs::read_link(dir.path().join(".rdeps")).unwrap(), elsewhere);
}

#[cfg(unix)]
#[test]
fn test_regular_file_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("cache"));
    std::fs::write(dir.path().join(".rdeps"), "keep me").unwrap();

    let status = WorkspaceLinker::default().link(&cache, dir.path()).unwrap();

    assert_eq!(status, LinkStatus::AlreadyPresent);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".rdeps")).unwrap(),
        "keep me"
    );
}

#[cfg(unix)]
#[test]
fn test_missing_workspace_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("cache"));
    let workspace = dir.path().join("does-not-exist");

    let err = WorkspaceLinker::default()
        .link(&cache, &workspace)
        .unwrap_err();

    let LinkError::CreateFailed { path, target, .. } = err;
    assert_eq!(path, workspace.join(".rdeps"));
    assert_eq!(target, cache.path());
}

#[test]
fn test_dry_run_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheRoot::new(dir.path().join("cache"));

    let status = WorkspaceLinker::default()
        .with_dry_run(true)
        .link(&cache, dir.path())
        .unwrap();

    assert_eq!(status, LinkStatus::Skipped);
    assert!(dir.path().join(".rdeps").symlink_metadata().is_err());
}

#[test]
fn test_custom_link_name() {
    let linker = WorkspaceLinker::new("deps");

    assert_eq!(
        linker.link_path(Path::new("/ws")),
        PathBuf::from("/ws").join("deps")
    );
}
