//! Working directory clone and update against local upstream repositories

use deploy_git::helpers::head_commit;
use deploy_git::{CheckoutTarget, Error, GitWorkingDir, WorkingDir};
use deploy_test_utils::git::UpstreamRepo;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn working_dir(upstream: &UpstreamRepo, basedir: &TempDir, reference: &str) -> GitWorkingDir {
    GitWorkingDir::new(CheckoutTarget::new(
        reference,
        upstream.url(),
        basedir.path(),
        "production",
    ))
}

#[test]
fn test_not_cloned_before_first_sync() {
    let upstream = UpstreamRepo::new();
    let basedir = TempDir::new().unwrap();
    let wd = working_dir(&upstream, &basedir, "main");

    assert!(!wd.cloned());
}

#[test]
fn test_first_sync_clones_branch() {
    let upstream = UpstreamRepo::new();
    let basedir = TempDir::new().unwrap();
    let mut wd = working_dir(&upstream, &basedir, "main");

    wd.sync().unwrap();

    assert!(wd.cloned());
    let readme = fs::read_to_string(basedir.path().join("production/README.md")).unwrap();
    assert_eq!(readme, "# Control repo\n");
}

#[test]
fn test_second_sync_fetches_new_commits() {
    let upstream = UpstreamRepo::new();
    let basedir = TempDir::new().unwrap();
    let mut wd = working_dir(&upstream, &basedir, "main");
    wd.sync().unwrap();

    let new_head = upstream.commit_file("site.pp", "node default {}\n", "Add site.pp");
    wd.sync().unwrap();

    assert_eq!(head_commit(wd.path()).unwrap(), new_head);
    assert!(basedir.path().join("production/site.pp").exists());
}

#[test]
fn test_sync_checks_out_non_default_branch() {
    let upstream = UpstreamRepo::new();
    upstream.checkout_new_branch("feature");
    let feature_head = upstream.commit_file("feature.txt", "wip\n", "Feature work");
    upstream.switch_branch("main");

    let basedir = TempDir::new().unwrap();
    let mut wd = working_dir(&upstream, &basedir, "feature");
    wd.sync().unwrap();

    assert_eq!(head_commit(wd.path()).unwrap(), feature_head);
}

#[test]
fn test_sync_checks_out_tag() {
    let upstream = UpstreamRepo::new();
    let tagged = upstream.tag("v1.0.0");
    upstream.commit_file("later.txt", "later\n", "After tag");

    let basedir = TempDir::new().unwrap();
    let mut wd = working_dir(&upstream, &basedir, "v1.0.0");
    wd.sync().unwrap();

    assert_eq!(head_commit(wd.path()).unwrap(), tagged);
    assert!(!basedir.path().join("production/later.txt").exists());
}

#[test]
fn test_unknown_reference_is_error() {
    let upstream = UpstreamRepo::new();
    let basedir = TempDir::new().unwrap();
    let mut wd = working_dir(&upstream, &basedir, "does-not-exist");

    let result = wd.sync();

    assert!(matches!(result, Err(Error::ReferenceNotFound { .. })));
}

#[test]
fn test_unreachable_remote_propagates() {
    let basedir = TempDir::new().unwrap();
    let mut wd = GitWorkingDir::new(CheckoutTarget::new(
        "main",
        basedir.path().join("no-such-remote").to_string_lossy(),
        basedir.path(),
        "production",
    ));

    assert!(wd.sync().is_err());
    assert!(!wd.cloned());
}
