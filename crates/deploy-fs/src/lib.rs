//! Filesystem helpers for environment deployment
//!
//! Provides atomic writes, format-agnostic config loading and the
//! directory housekeeping used when purging modules.

pub mod config;
pub mod dirs;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
