//! Error types for deploy-git

use std::path::PathBuf;

/// Result type for deploy-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deploy-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] deploy_fs::Error),

    #[error("Failed to clone {remote} into {path}: {message}")]
    CloneFailed {
        remote: String,
        path: PathBuf,
        message: String,
    },

    #[error("Failed to fetch {remote} in {path}: {message}")]
    FetchFailed {
        remote: String,
        path: PathBuf,
        message: String,
    },

    #[error("Reference '{reference}' not found in {path}")]
    ReferenceNotFound { reference: String, path: PathBuf },
}
