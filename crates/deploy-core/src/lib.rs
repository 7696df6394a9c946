//! Environment deployment orchestration
//!
//! Deploys version-controlled environments below a base directory and keeps
//! the modules each environment declares in sync.
//!
//! # Architecture
//!
//! ```text
//!                 deploy-core
//!          (Environment, DeployConfig)
//!                      |
//!          +-----------+------------+
//!          |                        |
//!     deploy-git              deploy-modules
//!  (WorkingDir, naming)   (ModuleProvider backends)
//!          |                        |
//!          +-----------+------------+
//!                      |
//!                  deploy-fs
//! ```
//!
//! A fresh clone always gets a full module sync; updating an existing
//! environment leaves module sync to the caller.

pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

pub use config::{DeployConfig, ProviderKind, Source};
pub use environment::Environment;
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_source_displays_name() {
        let error = Error::UnknownSource {
            name: "control".to_string(),
        };
        assert!(error.to_string().contains("control"));
    }

    #[test]
    fn upstream_errors_are_transparent() {
        let inner = deploy_modules::Error::CommandNotFound {
            command: "librarian-puppet install".to_string(),
        };
        let expected = inner.to_string();
        let error = Error::from(inner);
        assert_eq!(error.to_string(), expected);
    }
}
