//! Directory housekeeping

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A directory entry found directly below a parent directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDir {
    pub name: String,
    pub path: PathBuf,
}

/// List the immediate subdirectories of `parent`, sorted by name.
///
/// A missing parent yields an empty list. Hidden entries (leading `.`)
/// are skipped.
pub fn child_dirs(parent: &Path) -> Result<Vec<ChildDir>> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(parent, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(parent, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        dirs.push(ChildDir {
            name,
            path: entry.path(),
        });
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dirs)
}

/// Recursively remove a directory, logging what was removed.
pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), "Removed directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn child_dirs_skips_files_and_hidden_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("README"), "x").unwrap();

        let names: Vec<_> = child_dirs(temp.path())
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn child_dirs_of_missing_parent_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(child_dirs(&temp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn remove_dir_deletes_tree() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("module/manifests");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("init.pp"), "class x {}").unwrap();

        remove_dir(&temp.path().join("module")).unwrap();

        assert!(!temp.path().join("module").exists());
    }
}
