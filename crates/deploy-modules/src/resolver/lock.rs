//! Reader for librarian-style `Puppetfile.lock` files
//!
//! ```text
//! FORGE
//!   remote: https://forgeapi.puppetlabs.com
//!   specs:
//!     puppetlabs-stdlib (4.25.1)
//!
//! GIT
//!   remote: https://github.com/example/puppet-apache.git
//!   ref: v2.1.0
//!   sha: 3b8f1c2d
//!   specs:
//!     apache (2.1.0)
//!       puppetlabs-stdlib (>= 4.13.1)
//!
//! DEPENDENCIES
//!   apache (>= 0)
//! ```
//!
//! Only the resolved specs (four-space indent) are kept; their nested
//! dependency constraints are skipped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static SPEC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^    (\S+) \(([^)]+)\)$").expect("Invalid spec line regex"));

/// Kind of source a locked module came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Forge,
    Git,
    Path,
}

/// Where a locked module was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSource {
    pub kind: SourceKind,
    pub remote: Option<String>,
    pub reference: Option<String>,
}

/// One resolved module in the lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedManifest {
    pub name: String,
    pub version: String,
    pub source: LockSource,
}

/// Parse lockfile content. `path` is only used in errors.
pub fn parse(content: &str, path: &Path) -> Result<Vec<LockedManifest>> {
    let mut manifests = Vec::new();
    let mut source: Option<LockSource> = None;
    let mut in_specs = false;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !line.starts_with(' ') {
            source = section_kind(line.trim()).map(|kind| LockSource {
                kind,
                remote: None,
                reference: None,
            });
            in_specs = false;
            continue;
        }

        let Some(current) = source.as_mut() else {
            continue;
        };

        if line.starts_with("      ") {
            continue;
        }

        if in_specs && line.starts_with("    ") {
            let captures = SPEC_LINE.captures(line).ok_or_else(|| Error::LockParse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("malformed spec '{}'", line.trim()),
            })?;
            manifests.push(LockedManifest {
                name: captures[1].to_string(),
                version: captures[2].to_string(),
                source: current.clone(),
            });
            continue;
        }

        let (key, value) = line.trim().split_once(':').ok_or_else(|| Error::LockParse {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("expected 'key: value', found '{}'", line.trim()),
        })?;
        let value = value.trim();
        match key {
            "specs" => in_specs = true,
            "remote" | "path" => current.remote = Some(value.to_string()),
            "ref" => current.reference = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(manifests)
}

/// Read and parse a lockfile. A missing file has no entries.
pub fn read(path: &Path) -> Result<Vec<LockedManifest>> {
    match deploy_fs::io::read_text_if_exists(path)? {
        Some(content) => parse(&content, path),
        None => {
            tracing::debug!(path = %path.display(), "Lockfile missing; nothing resolved yet");
            Ok(Vec::new())
        }
    }
}

fn section_kind(header: &str) -> Option<SourceKind> {
    match header {
        "FORGE" => Some(SourceKind::Forge),
        "GIT" => Some(SourceKind::Git),
        "PATH" => Some(SourceKind::Path),
        _ => None,
    }
}
