//! Where and what to check out

use std::path::{Path, PathBuf};

/// Identity of a checkout: which ref of which remote lands in which directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutTarget {
    /// Branch, tag or commit to check out
    pub reference: String,

    /// Location of the remote repository
    pub remote: String,

    /// Directory that contains the checkout
    pub basedir: PathBuf,

    /// Name of the checkout directory below `basedir`
    pub dirname: String,
}

impl CheckoutTarget {
    pub fn new(
        reference: impl Into<String>,
        remote: impl Into<String>,
        basedir: impl Into<PathBuf>,
        dirname: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            remote: remote.into(),
            basedir: basedir.into(),
            dirname: dirname.into(),
        }
    }

    /// Full path of the checkout directory.
    pub fn path(&self) -> PathBuf {
        self.basedir.join(&self.dirname)
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }
}
