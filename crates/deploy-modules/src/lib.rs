//! Module providers for deployed environments
//!
//! An environment declares the modules it depends on. This crate loads
//! those declarations and keeps the installed modules in step, through one
//! of two interchangeable backends:
//!
//! - [`PuppetfileProvider`]: reads the `Puppetfile` itself and syncs each
//!   declared module on its own.
//! - [`ResolverProvider`]: hands the whole dependency graph to an external
//!   resolver (librarian-puppet by default) that installs it atomically.
//!
//! Callers depend only on the [`ModuleProvider`] trait.

pub mod error;
pub mod forge_module;
pub mod git_module;
pub mod module;
pub mod provider;
pub mod puppetfile;
pub mod resolver;
pub mod tools;

pub use error::{Error, Result};
pub use forge_module::ForgeModule;
pub use git_module::GitModule;
pub use module::{Module, ModuleRef};
pub use provider::{ModuleProvider, PuppetfileProvider, ResolverProvider};
pub use puppetfile::Puppetfile;
pub use resolver::{
    InstallOptions, LibrarianEngine, LocalConfig, LockedManifest, ResolvedModule, ResolverEngine,
};
