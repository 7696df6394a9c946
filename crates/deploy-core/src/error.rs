//! Error types for deploy-core

/// Result type for deploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deploy-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source name not present in the deployment config
    #[error("Unknown source '{name}'")]
    UnknownSource { name: String },

    // Upstream failures pass through unchanged
    /// Filesystem error from deploy-fs
    #[error(transparent)]
    Fs(#[from] deploy_fs::Error),

    /// Git error from deploy-git
    #[error(transparent)]
    Git(#[from] deploy_git::Error),

    /// Module provider error from deploy-modules
    #[error(transparent)]
    Modules(#[from] deploy_modules::Error),
}
