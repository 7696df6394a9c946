//! Delegated backend: an external resolver owns the dependency graph

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::ModuleProvider;
use crate::module::{Module, ModuleRef};
use crate::puppetfile::PUPPETFILE;
use crate::resolver::{DESTRUCTIVE, InstallOptions, LibrarianEngine, ResolvedModule, ResolverEngine};
use crate::{Error, Result, tools};

/// Hands module installation to a [`ResolverEngine`].
///
/// Every operation is gated on the Puppetfile being present, so the provider
/// can be run against environments that do not use it. The engine handle is
/// created on first use and kept for the provider's lifetime.
///
/// Not safe to share between callers working on the same `basedir`: the
/// destructive flag lives in the engine's on-disk config.
#[derive(Debug)]
pub struct ResolverProvider<E: ResolverEngine = LibrarianEngine> {
    basedir: PathBuf,
    moduledir: Option<PathBuf>,
    puppetfile_path: PathBuf,
    engine: Option<E>,
}

impl<E: ResolverEngine> ResolverProvider<E> {
    /// Create a provider, failing early if the engine's tools are missing.
    pub fn new(
        basedir: impl Into<PathBuf>,
        moduledir: Option<PathBuf>,
        puppetfile_path: Option<PathBuf>,
    ) -> Result<Self> {
        let missing = tools::missing_tools(E::REQUIRED_TOOLS);
        if !missing.is_empty() {
            return Err(Error::MissingDependency {
                backend: E::NAME.to_string(),
                required: E::REQUIRED_TOOLS.iter().map(|t| (*t).to_string()).collect(),
                missing,
            });
        }

        let basedir = basedir.into();
        let puppetfile_path = puppetfile_path.unwrap_or_else(|| basedir.join(PUPPETFILE));
        Ok(Self {
            basedir,
            moduledir,
            puppetfile_path,
            engine: None,
        })
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn puppetfile_exists(&self) -> bool {
        self.puppetfile_path.is_file()
    }

    /// The engine handle, opened on first access.
    pub fn engine(&mut self) -> Result<&mut E> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => {
                tracing::debug!(engine = E::NAME, basedir = %self.basedir.display(), "Opening resolver engine");
                E::open(&self.basedir)?
            }
        };
        Ok(self.engine.insert(engine))
    }

    fn install_options(&self) -> InstallOptions {
        InstallOptions {
            path: self.moduledir.clone(),
        }
    }

    fn log_missing_puppetfile(&self) {
        tracing::debug!(
            basedir = %self.basedir.display(),
            "Puppetfile in {} missing or unreadable",
            self.basedir.display()
        );
    }

    /// Run `f` with the destructive flag forced on, resetting it to
    /// `"false"` afterwards whether or not `f` succeeds.
    pub fn while_destructive<T>(&mut self, f: impl FnOnce(&mut E) -> Result<T>) -> Result<T> {
        let mut guard = DestructiveGuard::enable(self.engine()?)?;
        let value = f(guard.engine())?;
        guard.finish()?;
        Ok(value)
    }
}

impl<E: ResolverEngine> ModuleProvider for ResolverProvider<E> {
    fn sync(&mut self) -> Result<()> {
        if !self.puppetfile_exists() {
            self.log_missing_puppetfile();
            return Ok(());
        }

        let options = self.install_options();
        self.engine()?.install(&options)
    }

    fn sync_modules(&mut self) -> Result<()> {
        self.sync()
    }

    fn sync_module(&mut self, module: &dyn Module) -> Result<()> {
        Err(Error::UnsupportedOperation {
            operation: format!("deploying module '{}' individually", module.title()),
            backend: E::NAME.to_string(),
        })
    }

    fn sync_module_named(&mut self, name: &str) -> Result<()> {
        Err(Error::UnsupportedOperation {
            operation: format!("deploying module '{name}' individually"),
            backend: E::NAME.to_string(),
        })
    }

    fn modules(&mut self) -> Result<Vec<ModuleRef>> {
        if !self.puppetfile_exists() {
            return Ok(Vec::new());
        }

        let manifests = self.engine()?.locked_manifests()?;
        Ok(manifests
            .into_iter()
            .map(|manifest| Arc::new(ResolvedModule::new(manifest, E::NAME)) as ModuleRef)
            .collect())
    }

    fn purge(&mut self) -> Result<()> {
        if !self.puppetfile_exists() {
            self.log_missing_puppetfile();
            return Ok(());
        }

        // A destructive install removes whatever the manifest no longer declares
        if self.engine()?.local_config(DESTRUCTIVE)?.as_deref() == Some("true") {
            return self.sync();
        }

        let options = self.install_options();
        self.while_destructive(|engine| engine.install(&options))
    }
}

/// Holds the destructive flag on; dropping it resets the flag to `"false"`.
struct DestructiveGuard<'a, E: ResolverEngine> {
    engine: &'a mut E,
    armed: bool,
}

impl<'a, E: ResolverEngine> DestructiveGuard<'a, E> {
    fn enable(engine: &'a mut E) -> Result<Self> {
        engine.set_local_config(DESTRUCTIVE, "true")?;
        Ok(Self {
            engine,
            armed: true,
        })
    }

    fn engine(&mut self) -> &mut E {
        self.engine
    }

    fn finish(mut self) -> Result<()> {
        self.armed = false;
        self.engine.set_local_config(DESTRUCTIVE, "false")
    }
}

impl<E: ResolverEngine> Drop for DestructiveGuard<'_, E> {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = self.engine.set_local_config(DESTRUCTIVE, "false")
        {
            tracing::warn!(error = %e, "Failed to reset destructive flag");
        }
    }
}
