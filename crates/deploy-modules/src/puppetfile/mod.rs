//! The Puppetfile manifest model

pub mod parser;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::forge_module::ForgeModule;
use crate::git_module::GitModule;
use crate::module::ModuleRef;
use crate::{Error, Result};
use parser::Declaration;

/// File name of the manifest inside an environment.
pub const PUPPETFILE: &str = "Puppetfile";

/// Directory modules install into when the manifest names none.
pub const DEFAULT_MODULEDIR: &str = "modules";

/// Option keys that select the git reference, in order of preference.
const GIT_REF_KEYS: [&str; 4] = ["ref", "branch", "tag", "commit"];

/// A `Puppetfile` rooted at an environment directory.
///
/// Declarations are only read by [`Puppetfile::load`]; every call re-reads
/// the file so edits made by a working-directory sync are picked up.
#[derive(Debug, Clone)]
pub struct Puppetfile {
    basedir: PathBuf,
    puppetfile_path: PathBuf,
    initial_moduledir: PathBuf,
    moduledir: PathBuf,
    forge: Option<String>,
    modules: Vec<ModuleRef>,
}

impl Puppetfile {
    /// Create a manifest handle for `basedir`.
    ///
    /// `moduledir` and `puppetfile_path` default to `basedir/modules` and
    /// `basedir/Puppetfile`. Relative overrides resolve against `basedir`.
    pub fn new(
        basedir: impl Into<PathBuf>,
        moduledir: Option<PathBuf>,
        puppetfile_path: Option<PathBuf>,
    ) -> Self {
        let basedir = basedir.into();
        let moduledir = resolve(&basedir, moduledir.unwrap_or_else(|| DEFAULT_MODULEDIR.into()));
        let puppetfile_path = resolve(&basedir, puppetfile_path.unwrap_or_else(|| PUPPETFILE.into()));

        Self {
            basedir,
            puppetfile_path,
            initial_moduledir: moduledir.clone(),
            moduledir,
            forge: None,
            modules: Vec::new(),
        }
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn path(&self) -> &Path {
        &self.puppetfile_path
    }

    pub fn moduledir(&self) -> &Path {
        &self.moduledir
    }

    pub fn forge(&self) -> Option<&str> {
        self.forge.as_deref()
    }

    /// Whether the manifest file is present.
    pub fn exists(&self) -> bool {
        self.puppetfile_path.is_file()
    }

    /// Modules declared by the last [`Puppetfile::load`], in declaration order.
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// Read and evaluate the manifest.
    ///
    /// A missing file loads as an empty manifest.
    pub fn load(&mut self) -> Result<()> {
        self.moduledir = self.initial_moduledir.clone();
        self.forge = None;
        self.modules.clear();

        let Some(content) = deploy_fs::io::read_text_if_exists(&self.puppetfile_path)? else {
            tracing::debug!(path = %self.puppetfile_path.display(), "Puppetfile missing; no modules declared");
            return Ok(());
        };

        let declarations = parser::parse(&content).map_err(|e| Error::ManifestParse {
            path: self.puppetfile_path.clone(),
            line: e.line,
            message: e.message,
        })?;

        for (line, declaration) in declarations {
            self.apply(line, declaration)?;
        }

        tracing::debug!(
            path = %self.puppetfile_path.display(),
            modules = self.modules.len(),
            "Loaded Puppetfile"
        );
        Ok(())
    }

    fn apply(&mut self, line: usize, declaration: Declaration) -> Result<()> {
        match declaration {
            Declaration::Forge(url) => self.forge = Some(url),
            Declaration::Moduledir(dir) => self.moduledir = resolve(&self.basedir, dir.into()),
            Declaration::Module {
                title,
                version,
                options,
            } => {
                let module = self.build_module(title, version, options).map_err(|message| {
                    Error::ManifestParse {
                        path: self.puppetfile_path.clone(),
                        line,
                        message,
                    }
                })?;
                self.modules.push(module);
            }
        }
        Ok(())
    }

    fn build_module(
        &self,
        title: String,
        version: Option<String>,
        mut options: BTreeMap<String, String>,
    ) -> std::result::Result<ModuleRef, String> {
        if let Some(remote) = options.remove("git") {
            if version.is_some() {
                return Err(format!("git module '{title}' cannot also pin a version"));
            }
            let reference = GIT_REF_KEYS.iter().find_map(|key| options.remove(*key));
            if let Some(key) = options.keys().next() {
                return Err(format!("unsupported option ':{key}' for module '{title}'"));
            }
            return GitModule::new(title, remote, reference, &self.moduledir)
                .map(|module| Arc::new(module) as ModuleRef)
                .map_err(|e| e.to_string());
        }

        if let Some(key) = options.keys().next() {
            return Err(format!("unsupported option ':{key}' for module '{title}'"));
        }

        ForgeModule::new(title, version, &self.moduledir, self.forge.clone())
            .map(|module| Arc::new(module) as ModuleRef)
            .map_err(|e| e.to_string())
    }
}

fn resolve(basedir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        basedir.join(path)
    }
}
