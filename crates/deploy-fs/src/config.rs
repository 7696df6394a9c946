//! Format-agnostic configuration loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// Config file formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and handles
/// serialization transparently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = Format::from_path(path)?;
        let content = io::read_text(path)?;
        self.parse(path, format, &content)
    }

    /// Parse already-read content as the given format.
    ///
    /// `path` is only used for error reporting.
    pub fn parse<T: DeserializeOwned>(&self, path: &Path, format: Format, content: &str) -> Result<T> {
        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };

        match format {
            Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Save configuration to a file atomically.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let format = Format::from_path(path)?;
        let content = self.render(path, format, value)?;
        io::write_text(path, &content)
    }

    /// Serialize a value in the given format.
    pub fn render<T: Serialize>(&self, path: &Path, format: Format, value: &T) -> Result<String> {
        let serialize_error = |message: String| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };

        match format {
            Format::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))
            }
            Format::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))
            }
            Format::Yaml => serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string())),
        }
    }
}
