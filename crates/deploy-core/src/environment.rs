//! A deployed environment and its synchronization rules

use std::path::{Path, PathBuf};

use deploy_git::naming::environment_dirname;
use deploy_git::{CheckoutTarget, GitWorkingDir, WorkingDir};
use deploy_modules::{LibrarianEngine, ModuleProvider, ModuleRef, PuppetfileProvider, ResolverProvider};

use crate::{ProviderKind, Result};

/// One branch of a source, deployed to `basedir/dirname`.
///
/// `dirname` is derived from the untrusted branch (and optional source)
/// name once at construction and only ever holds word characters, so
/// `full_path` always stays inside `basedir`.
pub struct Environment<W: WorkingDir = GitWorkingDir> {
    name: String,
    remote: String,
    basedir: PathBuf,
    source_name: String,
    dirname: String,
    full_path: PathBuf,
    working_dir: W,
    provider_kind: ProviderKind,
    provider: Option<Box<dyn ModuleProvider>>,
}

impl Environment<GitWorkingDir> {
    /// Create a git-backed environment.
    ///
    /// A non-empty `source_name` is prepended to the directory name.
    pub fn new(
        name: impl Into<String>,
        remote: impl Into<String>,
        basedir: impl Into<PathBuf>,
        source_name: Option<&str>,
    ) -> Self {
        Self::with_working_dir(name, remote, basedir, source_name, |target| {
            GitWorkingDir::new(target.clone())
        })
    }
}

impl<W: WorkingDir> Environment<W> {
    /// Create an environment whose working directory is built by `make_working_dir`.
    pub fn with_working_dir(
        name: impl Into<String>,
        remote: impl Into<String>,
        basedir: impl Into<PathBuf>,
        source_name: Option<&str>,
        make_working_dir: impl FnOnce(&CheckoutTarget) -> W,
    ) -> Self {
        let name = name.into();
        let remote = remote.into();
        let basedir = basedir.into();
        let source_name = source_name.unwrap_or_default().to_string();

        let dirname = environment_dirname(&name, &source_name);
        let full_path = basedir.join(&dirname);
        let target = CheckoutTarget::new(&name, &remote, &basedir, &dirname);
        let working_dir = make_working_dir(&target);

        Self {
            name,
            remote,
            basedir,
            source_name,
            dirname,
            full_path,
            working_dir,
            provider_kind: ProviderKind::default(),
            provider: None,
        }
    }

    /// Choose the module backend built on first use.
    pub fn with_provider_kind(mut self, kind: ProviderKind) -> Self {
        self.provider_kind = kind;
        self
    }

    /// Use an already constructed module provider.
    pub fn with_provider(mut self, provider: Box<dyn ModuleProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider_kind
    }

    pub fn working_dir(&self) -> &W {
        &self.working_dir
    }

    /// Sync the working tree; on a fresh clone, sync all modules too.
    ///
    /// Updates to an existing environment leave modules alone; call
    /// [`Environment::sync_modules`] separately for that.
    pub fn sync(&mut self) -> Result<()> {
        let fresh_clone = !self.working_dir.cloned();
        self.working_dir.sync()?;

        if fresh_clone {
            tracing::debug!(
                path = %self.full_path.display(),
                "Environment is a fresh clone; automatically updating modules"
            );
            self.sync_modules()?;
        }
        Ok(())
    }

    /// Sync every declared module, stopping at the first failure.
    pub fn sync_modules(&mut self) -> Result<()> {
        self.provider()?.sync_modules()?;
        Ok(())
    }

    /// Sync the declared module with the given name or title.
    ///
    /// The provider answers first, so a backend that cannot sync single
    /// modules fails with `UnsupportedOperation` even for unknown names.
    pub fn sync_module(&mut self, name: &str) -> Result<()> {
        self.provider()?.sync_module_named(name)?;
        Ok(())
    }

    /// Modules declared for this environment.
    pub fn modules(&mut self) -> Result<Vec<ModuleRef>> {
        Ok(self.provider()?.modules()?)
    }

    /// Remove installed modules the environment no longer declares.
    pub fn purge(&mut self) -> Result<()> {
        self.provider()?.purge()?;
        Ok(())
    }

    /// The module provider, built on first access.
    pub fn provider(&mut self) -> Result<&mut dyn ModuleProvider> {
        let provider = match self.provider.take() {
            Some(provider) => provider,
            None => build_provider(self.provider_kind, &self.full_path)?,
        };
        Ok(&mut **self.provider.insert(provider))
    }
}

fn build_provider(kind: ProviderKind, full_path: &Path) -> Result<Box<dyn ModuleProvider>> {
    Ok(match kind {
        ProviderKind::Puppetfile => Box::new(PuppetfileProvider::new(full_path, None, None)),
        ProviderKind::Librarian => {
            Box::new(ResolverProvider::<LibrarianEngine>::new(full_path, None, None)?)
        }
    })
}

impl<W: WorkingDir + std::fmt::Debug> std::fmt::Debug for Environment<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("name", &self.name)
            .field("remote", &self.remote)
            .field("full_path", &self.full_path)
            .field("working_dir", &self.working_dir)
            .field("provider_kind", &self.provider_kind)
            .finish_non_exhaustive()
    }
}
