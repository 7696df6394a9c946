//! Deployment configuration
//!
//! ```yaml
//! sources:
//!   control:
//!     remote: "https://git.example.com/control.git"
//!     basedir: "/etc/puppetlabs/code/environments"
//!     prefix: true
//!     provider: librarian
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use deploy_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::{Environment, Error, Result};

/// Which backend manages an environment's modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The Puppetfile is read and each module synced on its own
    #[default]
    Puppetfile,
    /// librarian-puppet resolves and installs the whole graph
    Librarian,
}

/// A remote whose branches deploy as environments below `basedir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub remote: String,

    pub basedir: PathBuf,

    /// Prefix environment directories with the source name
    #[serde(default)]
    pub prefix: bool,

    #[serde(default)]
    pub provider: ProviderKind,
}

impl Source {
    /// Environment for `branch` of this source.
    pub fn environment(&self, source_name: &str, branch: &str) -> Environment {
        let prefix = self.prefix.then_some(source_name);
        Environment::new(branch, &self.remote, &self.basedir, prefix)
            .with_provider_kind(self.provider)
    }
}

/// Top-level deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, Source>,
}

impl DeployConfig {
    /// Load from a `.yaml`, `.yml`, `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), sources = config.sources.len(), "Loaded deployment config");
        Ok(config)
    }

    pub fn source(&self, name: &str) -> Result<&Source> {
        self.sources.get(name).ok_or_else(|| Error::UnknownSource {
            name: name.to_string(),
        })
    }

    /// Environment for `branch` of the named source.
    pub fn environment(&self, source_name: &str, branch: &str) -> Result<Environment> {
        Ok(self.source(source_name)?.environment(source_name, branch))
    }
}
