//! Error types for deploy-modules

use std::path::PathBuf;

/// Result type for deploy-modules operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deploy-modules operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] deploy_fs::Error),

    #[error("Git error: {0}")]
    Git(#[from] deploy_git::Error),

    #[error("{backend} does not support {operation}: modules are resolved and installed as a whole")]
    UnsupportedOperation { operation: String, backend: String },

    #[error("Install {} to use the {backend} integration (missing: {})", .required.join(", "), .missing.join(", "))]
    MissingDependency {
        backend: String,
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Invalid Puppetfile {path} at line {line}: {message}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid lockfile {path} at line {line}: {message}")]
    LockParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid module name '{title}' (expected 'name', 'author/name' or 'author-name')")]
    InvalidModuleName { title: String },

    #[error("Module '{name}' is not declared")]
    ModuleNotFound { name: String },

    #[error("Command failed: {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
}
