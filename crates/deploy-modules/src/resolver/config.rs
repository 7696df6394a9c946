//! The engine's local key/value config store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use deploy_fs::ConfigStore;
use deploy_fs::config::Format;

use crate::Result;

/// Location of the store relative to the environment directory.
const CONFIG_PATH: &str = ".librarian/puppet/config";

/// Prefix the store applies to every key.
const KEY_PREFIX: &str = "LIBRARIAN_PUPPET_";

/// YAML-backed local configuration, as librarian-puppet keeps it.
///
/// Keys are given in short form (`destructive`) and stored prefixed and
/// upper-cased (`LIBRARIAN_PUPPET_DESTRUCTIVE`). The file is re-read on
/// every access so changes made by the engine itself are visible.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    path: PathBuf,
}

impl LocalConfig {
    pub fn new(basedir: &Path) -> Self {
        Self {
            path: basedir.join(CONFIG_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(&storage_key(key)))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(storage_key(key), value.to_string());
        self.write(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read()?;
        if entries.remove(&storage_key(key)).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        let Some(content) = deploy_fs::io::read_text_if_exists(&self.path)? else {
            return Ok(BTreeMap::new());
        };
        if content.trim().is_empty() || content.trim() == "---" {
            return Ok(BTreeMap::new());
        }
        let raw: BTreeMap<String, serde_json::Value> =
            ConfigStore::new().parse(&self.path, Format::Yaml, &content)?;

        // Hand-edited stores may hold unquoted booleans or numbers
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect())
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = ConfigStore::new().render(&self.path, Format::Yaml, entries)?;
        deploy_fs::io::write_text(&self.path, &content)?;
        Ok(())
    }
}

fn storage_key(key: &str) -> String {
    let normalized: String = key
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("{KEY_PREFIX}{normalized}")
}
