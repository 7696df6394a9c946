//! ModuleProvider trait and its backends

mod puppetfile;
mod resolver;

pub use puppetfile::PuppetfileProvider;
pub use resolver::ResolverProvider;

use crate::module::{Module, ModuleRef};
use crate::{Error, Result};

/// Uniform interface over module-resolution backends.
pub trait ModuleProvider {
    /// Bring every declared module up to date.
    fn sync(&mut self) -> Result<()>;

    /// Sync all modules declared by the manifest.
    fn sync_modules(&mut self) -> Result<()>;

    /// Sync a single module.
    fn sync_module(&mut self, module: &dyn Module) -> Result<()>;

    /// Sync the declared module with the given short name or title.
    fn sync_module_named(&mut self, name: &str) -> Result<()> {
        let module = find_module(self, name)?;
        self.sync_module(module.as_ref())
    }

    /// Modules declared by the manifest, in declaration order.
    fn modules(&mut self) -> Result<Vec<ModuleRef>>;

    /// Remove installed modules the manifest no longer declares.
    fn purge(&mut self) -> Result<()>;
}

/// Find a declared module by its short name or full title.
pub fn find_module<P: ModuleProvider + ?Sized>(provider: &mut P, name: &str) -> Result<ModuleRef> {
    provider
        .modules()?
        .into_iter()
        .find(|m| m.name() == name || m.title() == name)
        .ok_or_else(|| Error::ModuleNotFound {
            name: name.to_string(),
        })
}
