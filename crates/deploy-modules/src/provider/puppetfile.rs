//! Declarative backend: the Puppetfile is the source of truth

use std::collections::HashSet;
use std::path::PathBuf;

use super::ModuleProvider;
use crate::module::{Module, ModuleRef};
use crate::puppetfile::Puppetfile;
use crate::Result;

/// Syncs each module the Puppetfile declares, one at a time.
#[derive(Debug, Clone)]
pub struct PuppetfileProvider {
    puppetfile: Puppetfile,
}

impl PuppetfileProvider {
    pub fn new(
        basedir: impl Into<PathBuf>,
        moduledir: Option<PathBuf>,
        puppetfile_path: Option<PathBuf>,
    ) -> Self {
        Self {
            puppetfile: Puppetfile::new(basedir, moduledir, puppetfile_path),
        }
    }

    pub fn puppetfile(&self) -> &Puppetfile {
        &self.puppetfile
    }
}

impl ModuleProvider for PuppetfileProvider {
    fn sync(&mut self) -> Result<()> {
        self.sync_modules()
    }

    fn sync_modules(&mut self) -> Result<()> {
        for module in self.modules()? {
            module.sync()?;
        }
        Ok(())
    }

    fn sync_module(&mut self, module: &dyn Module) -> Result<()> {
        module.sync()
    }

    fn modules(&mut self) -> Result<Vec<ModuleRef>> {
        self.puppetfile.load()?;
        Ok(self.puppetfile.modules().to_vec())
    }

    fn purge(&mut self) -> Result<()> {
        let declared: HashSet<String> = self
            .modules()?
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        for dir in deploy_fs::dirs::child_dirs(self.puppetfile.moduledir())? {
            if !declared.contains(&dir.name) {
                tracing::info!(module = %dir.name, "Purging undeclared module");
                deploy_fs::dirs::remove_dir(&dir.path)?;
            }
        }
        Ok(())
    }
}
