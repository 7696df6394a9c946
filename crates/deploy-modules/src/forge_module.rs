//! Modules installed from a Puppet Forge

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::module::{Module, parse_title};
use crate::{Error, Result, tools};

/// Version meaning "whatever the forge has newest".
pub const LATEST: &str = "latest";

/// A module declared as `mod 'author/name'[, 'version']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeModule {
    title: String,
    name: String,
    version: String,
    moduledir: PathBuf,
    forge: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    version: String,
}

impl ForgeModule {
    /// Create a forge module. The title must carry an owner prefix.
    pub fn new(
        title: impl Into<String>,
        version: Option<String>,
        moduledir: &Path,
        forge: Option<String>,
    ) -> Result<Self> {
        let title = title.into();
        let name = parse_title(&title)?.to_string();
        if name == title {
            return Err(Error::InvalidModuleName { title });
        }

        Ok(Self {
            name,
            version: version.unwrap_or_else(|| LATEST.to_string()),
            moduledir: moduledir.to_path_buf(),
            forge,
            title,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.moduledir.join(&self.name)
    }

    /// Version recorded in the installed module's `metadata.json`.
    pub fn installed_version(&self) -> Result<Option<String>> {
        let metadata_path = self.path().join("metadata.json");
        let Some(content) = deploy_fs::io::read_text_if_exists(&metadata_path)? else {
            return Ok(None);
        };
        let metadata: Metadata = deploy_fs::ConfigStore::new().parse(
            &metadata_path,
            deploy_fs::config::Format::Json,
            &content,
        )?;
        Ok(Some(metadata.version))
    }

    fn install_command(&self) -> Command {
        let mut command = Command::new("puppet");
        command
            .args(["module", "install", "--ignore-dependencies", "--force"])
            .arg("--target-dir")
            .arg(&self.moduledir);
        if self.version != LATEST {
            command.args(["--version", &self.version]);
        }
        if let Some(forge) = &self.forge {
            command.args(["--module_repository", forge]);
        }
        command.arg(self.title.replace('/', "-"));
        command
    }
}

impl Module for ForgeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn version(&self) -> String {
        self.version.clone()
    }

    fn sync(&self) -> Result<()> {
        if self.version != LATEST
            && self.installed_version()?.as_deref() == Some(self.version.as_str())
        {
            tracing::debug!(module = %self.title, version = %self.version, "Forge module up to date");
            return Ok(());
        }

        tracing::info!(module = %self.title, version = %self.version, "Installing forge module");
        tools::run(&mut self.install_command())?;
        Ok(())
    }
}
