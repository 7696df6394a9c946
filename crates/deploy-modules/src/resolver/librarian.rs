//! librarian-puppet as a resolver engine

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{InstallOptions, LocalConfig, LockedManifest, ResolverEngine, lock};
use crate::{Result, tools};

const LOCKFILE: &str = "Puppetfile.lock";

/// Drives the `librarian-puppet` executable inside an environment directory.
#[derive(Debug, Clone)]
pub struct LibrarianEngine {
    basedir: PathBuf,
    config: LocalConfig,
}

impl LibrarianEngine {
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    fn install_command(&self, options: &InstallOptions) -> Command {
        let mut command = Command::new("librarian-puppet");
        command.arg("install").current_dir(&self.basedir);
        if let Some(path) = &options.path {
            command.arg("--path").arg(path);
        }
        command
    }
}

impl ResolverEngine for LibrarianEngine {
    const NAME: &'static str = "librarian-puppet";
    // librarian-puppet exits outright when puppet cannot be loaded
    const REQUIRED_TOOLS: &'static [&'static str] = &["librarian-puppet", "puppet"];

    fn open(basedir: &Path) -> Result<Self> {
        Ok(Self {
            basedir: basedir.to_path_buf(),
            config: LocalConfig::new(basedir),
        })
    }

    fn install(&mut self, options: &InstallOptions) -> Result<()> {
        tracing::info!(basedir = %self.basedir.display(), "Running librarian-puppet install");
        tools::run(&mut self.install_command(options))?;
        Ok(())
    }

    fn locked_manifests(&self) -> Result<Vec<LockedManifest>> {
        lock::read(&self.basedir.join(LOCKFILE))
    }

    fn local_config(&self, key: &str) -> Result<Option<String>> {
        self.config.get(key)
    }

    fn set_local_config(&mut self, key: &str, value: &str) -> Result<()> {
        self.config.set(key, value)
    }
}
