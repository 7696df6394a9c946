//! Upstream git repositories for clone/fetch tests.
//!
//! Everything is built with `git2`, so no `git` binary is needed.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// A local repository that tests clone from via its filesystem path.
pub struct UpstreamRepo {
    temp_dir: TempDir,
    repo: Repository,
}

impl Default for UpstreamRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamRepo {
    /// Initialise an upstream repository with one commit on `main`.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path())
            .unwrap_or_else(|e| panic!("UpstreamRepo: failed to init repository: {e}"));
        repo.set_head("refs/heads/main").unwrap();

        let upstream = Self { temp_dir, repo };
        upstream.commit_file("README.md", "# Control repo\n", "Initial commit");
        upstream
    }

    /// Filesystem path of the repository.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Remote URL to clone from.
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Write `content` to `file` on the current branch and commit it.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn commit_file(&self, file: &str, content: &str, message: &str) -> Oid {
        let full_path = self.path().join(file);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let sig = signature();
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap_or_else(|e| panic!("UpstreamRepo: commit failed: {e}"))
    }

    /// Create `branch` at the current HEAD and switch HEAD to it.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn checkout_new_branch(&self, branch: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(branch, &head, false).unwrap();
        self.repo.set_head(&format!("refs/heads/{branch}")).unwrap();
    }

    /// Switch HEAD back to an existing branch.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn switch_branch(&self, branch: &str) {
        self.repo.set_head(&format!("refs/heads/{branch}")).unwrap();
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
            .unwrap();
    }

    /// Create a lightweight tag at the current HEAD.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn tag(&self, name: &str) -> Oid {
        let head = self.repo.head().unwrap().peel(git2::ObjectType::Commit).unwrap();
        self.repo.tag_lightweight(name, &head, false).unwrap();
        head.id()
    }
}

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@test.com").unwrap()
}
