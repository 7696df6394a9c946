//! Modules checked out straight from a git remote

use std::path::{Path, PathBuf};

use deploy_git::helpers;

use crate::module::{Module, parse_title};
use crate::Result;

/// Reference used when a git module names none.
pub const DEFAULT_REF: &str = "master";

/// A module declared with `:git => '<url>'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitModule {
    title: String,
    name: String,
    remote: String,
    reference: String,
    path: PathBuf,
}

impl GitModule {
    pub fn new(
        title: impl Into<String>,
        remote: impl Into<String>,
        reference: Option<String>,
        moduledir: &Path,
    ) -> Result<Self> {
        let title = title.into();
        let name = parse_title(&title)?.to_string();
        let path = moduledir.join(&name);
        Ok(Self {
            title,
            name,
            remote: remote.into(),
            reference: reference.unwrap_or_else(|| DEFAULT_REF.to_string()),
            path,
        })
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Module for GitModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn version(&self) -> String {
        self.reference.clone()
    }

    fn sync(&self) -> Result<()> {
        tracing::info!(module = %self.title, reference = %self.reference, "Syncing git module");
        if helpers::is_cloned(&self.path) {
            helpers::fetch_and_checkout(&self.remote, &self.path, &self.reference)?;
        } else {
            helpers::clone_and_checkout(&self.remote, &self.path, &self.reference)?;
        }
        Ok(())
    }
}
