//! Puppetfile and lockfile fixtures.

use std::fs;
use std::path::{Path, PathBuf};

/// Write a `Puppetfile` into `dir` and return its path.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_puppetfile(dir: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("Puppetfile");
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write_puppetfile: failed to write {}: {e}", path.display()));
    path
}

/// Write a `Puppetfile.lock` into `dir` and return its path.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_lockfile(dir: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("Puppetfile.lock");
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write_lockfile: failed to write {}: {e}", path.display()));
    path
}

/// A lockfile with one forge module and one git module.
pub const SAMPLE_LOCK: &str = "\
FORGE
  remote: https://forgeapi.puppetlabs.com
  specs:
    puppetlabs-stdlib (4.25.1)

GIT
  remote: https://github.com/example/puppet-apache.git
  ref: v2.1.0
  sha: 3b8f1c2d
  specs:
    apache (2.1.0)
      puppetlabs-stdlib (>= 4.13.1)

DEPENDENCIES
  apache (>= 0)
  puppetlabs-stdlib (>= 0)

";
