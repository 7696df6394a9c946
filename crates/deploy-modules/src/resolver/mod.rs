//! External dependency resolution engines
//!
//! A resolver engine owns the whole dependency graph of an environment:
//! it installs everything declared by the manifest in one step, records the
//! result in a lockfile and keeps its own small key/value configuration.

mod config;
mod librarian;
pub mod lock;

use std::path::{Path, PathBuf};

pub use config::LocalConfig;
pub use librarian::LibrarianEngine;
pub use lock::{LockSource, LockedManifest, SourceKind};

use crate::module::{Module, parse_title};
use crate::{Error, Result};

/// Config key controlling whether installs may remove undeclared modules.
pub const DESTRUCTIVE: &str = "destructive";

/// Options passed to the engine's install action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Install into this directory instead of the engine's default.
    pub path: Option<PathBuf>,
}

/// An external dependency-resolution tool.
pub trait ResolverEngine: Sized {
    /// Human readable backend name, used in errors and logs.
    const NAME: &'static str;

    /// Executables that must be on `PATH` before the engine can be used.
    const REQUIRED_TOOLS: &'static [&'static str];

    /// Bind an engine to the environment directory.
    fn open(basedir: &Path) -> Result<Self>;

    /// Resolve and install the full dependency graph.
    fn install(&mut self, options: &InstallOptions) -> Result<()>;

    /// Entries recorded in the engine's lockfile.
    fn locked_manifests(&self) -> Result<Vec<LockedManifest>>;

    /// Read a key from the engine's local config store.
    fn local_config(&self, key: &str) -> Result<Option<String>>;

    /// Write a key to the engine's local config store.
    fn set_local_config(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A lockfile entry presented as a module.
///
/// The version is the one the engine resolved, not whatever the manifest
/// asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    manifest: LockedManifest,
    resolved_version: String,
    backend: &'static str,
}

impl ResolvedModule {
    pub fn new(manifest: LockedManifest, backend: &'static str) -> Self {
        let resolved_version = manifest.version.clone();
        Self {
            manifest,
            resolved_version,
            backend,
        }
    }

    pub fn manifest(&self) -> &LockedManifest {
        &self.manifest
    }
}

impl Module for ResolvedModule {
    fn name(&self) -> &str {
        parse_title(&self.manifest.name).unwrap_or(&self.manifest.name)
    }

    fn title(&self) -> &str {
        &self.manifest.name
    }

    fn version(&self) -> String {
        self.resolved_version.clone()
    }

    fn sync(&self) -> Result<()> {
        Err(Error::UnsupportedOperation {
            operation: format!("syncing module '{}' on its own", self.manifest.name),
            backend: self.backend.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LockedManifest {
        LockedManifest {
            name: "puppetlabs-stdlib".to_string(),
            version: "4.25.1".to_string(),
            source: LockSource {
                kind: SourceKind::Forge,
                remote: Some("https://forgeapi.puppetlabs.com".to_string()),
                reference: None,
            },
        }
    }

    #[test]
    fn test_resolved_module_reports_locked_version() {
        let module = ResolvedModule::new(manifest(), "librarian-puppet");
        assert_eq!(module.version(), "4.25.1");
        assert_eq!(module.name(), "stdlib");
        assert_eq!(module.title(), "puppetlabs-stdlib");
    }

    #[test]
    fn test_resolved_module_cannot_sync_alone() {
        let module = ResolvedModule::new(manifest(), "librarian-puppet");
        assert!(matches!(module.sync(), Err(Error::UnsupportedOperation { .. })));
    }
}
