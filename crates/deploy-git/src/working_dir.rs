//! Working directories backing deployed environments

use std::path::PathBuf;

use crate::{CheckoutTarget, Result, helpers};

/// A checked-out directory tree that can be brought up to date.
pub trait WorkingDir {
    /// Whether a local copy already exists.
    fn cloned(&self) -> bool;

    /// Clone or update the local copy so it matches the remote.
    fn sync(&mut self) -> Result<()>;
}

/// Git-backed working directory.
///
/// The first `sync` clones the remote; later calls fetch and hard-reset
/// to the configured reference.
#[derive(Debug, Clone)]
pub struct GitWorkingDir {
    target: CheckoutTarget,
    path: PathBuf,
}

impl GitWorkingDir {
    pub fn new(target: CheckoutTarget) -> Self {
        let path = target.path();
        Self { target, path }
    }

    pub fn target(&self) -> &CheckoutTarget {
        &self.target
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl From<&CheckoutTarget> for GitWorkingDir {
    fn from(target: &CheckoutTarget) -> Self {
        Self::new(target.clone())
    }
}

impl WorkingDir for GitWorkingDir {
    fn cloned(&self) -> bool {
        helpers::is_cloned(&self.path)
    }

    fn sync(&mut self) -> Result<()> {
        let CheckoutTarget {
            reference, remote, ..
        } = &self.target;

        if self.cloned() {
            helpers::fetch_and_checkout(remote, &self.path, reference)?;
        } else {
            helpers::clone_and_checkout(remote, &self.path, reference)?;
        }
        Ok(())
    }
}
