//! Shared test utilities for the deployment workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: upstream git repositories to clone from
//! - [`puppetfile`]: Puppetfile and lockfile writers

pub mod git;
pub mod puppetfile;
