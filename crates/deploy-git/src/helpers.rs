//! Shared git2 helpers for clone, fetch and checkout
//!
//! Used by environment working directories and by git-backed modules.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, ResetType, build::RepoBuilder};

use crate::{Error, Result};

/// Remote name used for every checkout.
pub const ORIGIN: &str = "origin";

const FETCH_REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

/// Whether `path` holds a git checkout.
pub fn is_cloned(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Clone `remote` into `path` and check out `reference`.
pub fn clone_and_checkout(remote: &str, path: &Path, reference: &str) -> Result<Repository> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| deploy_fs::Error::io(parent, e))?;
    }

    tracing::info!(remote = %remote, path = %path.display(), "Cloning");
    let repo = RepoBuilder::new()
        .clone(remote, path)
        .map_err(|e| Error::CloneFailed {
            remote: remote.to_string(),
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

    checkout_reference(&repo, path, reference)?;
    Ok(repo)
}

/// Fetch from `remote` into an existing checkout and check out `reference`.
///
/// The `origin` URL is re-pointed at `remote` first if it changed.
pub fn fetch_and_checkout(remote: &str, path: &Path, reference: &str) -> Result<Repository> {
    let repo = Repository::open(path)?;

    let current_url = repo.find_remote(ORIGIN)?.url().map(str::to_string);
    if current_url.as_deref() != Some(remote) {
        tracing::info!(
            path = %path.display(),
            from = ?current_url,
            to = %remote,
            "Updating origin URL"
        );
        repo.remote_set_url(ORIGIN, remote)?;
    }

    tracing::debug!(remote = %remote, path = %path.display(), "Fetching");
    {
        let mut origin = repo.find_remote(ORIGIN)?;
        origin
            .fetch(&FETCH_REFSPECS, None, None)
            .map_err(|e| Error::FetchFailed {
                remote: remote.to_string(),
                path: path.to_path_buf(),
                message: e.message().to_string(),
            })?;
    }

    checkout_reference(&repo, path, reference)?;
    Ok(repo)
}

/// Force the working tree of `repo` to `reference`.
///
/// Branches resolve against `origin` and are checked out as a local branch
/// tracking the fetched head. Tags and commit ids leave HEAD detached.
pub fn checkout_reference(repo: &Repository, path: &Path, reference: &str) -> Result<()> {
    let remote_branch = format!("refs/remotes/{ORIGIN}/{reference}");

    if let Ok(remote_ref) = repo.find_reference(&remote_branch) {
        let commit = remote_ref.peel_to_commit()?;
        let local_branch = format!("refs/heads/{reference}");
        repo.reference(
            &local_branch,
            commit.id(),
            true,
            &format!("deploy: reset {reference} to {}", commit.id()),
        )?;
        repo.set_head(&local_branch)?;
        repo.reset(commit.as_object(), ResetType::Hard, None)?;
        tracing::debug!(path = %path.display(), branch = %reference, commit = %commit.id(), "Checked out branch");
        return Ok(());
    }

    let commit_id = resolve_detached(repo, reference).ok_or_else(|| Error::ReferenceNotFound {
        reference: reference.to_string(),
        path: path.to_path_buf(),
    })?;
    let commit = repo.find_commit(commit_id)?;
    repo.set_head_detached(commit_id)?;
    repo.reset(commit.as_object(), ResetType::Hard, None)?;
    tracing::debug!(path = %path.display(), reference = %reference, commit = %commit_id, "Checked out detached");

    Ok(())
}

/// Resolve a tag or commit-ish that is not a remote branch.
fn resolve_detached(repo: &Repository, reference: &str) -> Option<Oid> {
    let tag = format!("refs/tags/{reference}");
    if let Ok(tag_ref) = repo.find_reference(&tag) {
        return tag_ref.peel_to_commit().ok().map(|c| c.id());
    }

    repo.revparse_single(reference)
        .ok()
        .and_then(|object| object.peel_to_commit().ok())
        .map(|c| c.id())
}

/// The commit currently checked out at `path`.
pub fn head_commit(path: &Path) -> Result<Oid> {
    let repo = Repository::open(path)?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id())
}
