//! Git abstraction for environment deployment
//!
//! Maps untrusted branch names onto safe directory names and keeps
//! checked-out working directories in step with their remotes.

pub mod error;
pub mod helpers;
pub mod naming;
pub mod target;
pub mod working_dir;

pub use error::{Error, Result};
pub use naming::sanitize_dirname;
pub use target::CheckoutTarget;
pub use working_dir::{GitWorkingDir, WorkingDir};
