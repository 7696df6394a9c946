//! Module descriptors

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{Error, Result};

/// A single dependency unit declared by an environment.
pub trait Module: fmt::Debug + Send + Sync {
    /// Short name; also the module's directory below the moduledir.
    fn name(&self) -> &str;

    /// Name as declared, including any `author/` or `author-` prefix.
    fn title(&self) -> &str {
        self.name()
    }

    /// Version the module is expected to be at.
    fn version(&self) -> String;

    /// Install or update this module in place.
    fn sync(&self) -> Result<()>;
}

/// Shared handle to a module descriptor.
pub type ModuleRef = Arc<dyn Module>;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_]+[-/])?([A-Za-z0-9_]+)$").expect("Invalid module title regex")
});

/// Validate a declared title and split off its short name.
///
/// `puppetlabs/stdlib` and `puppetlabs-stdlib` both become `stdlib`;
/// `apache` is returned unchanged. Anything else, including titles with
/// path components, is rejected because the short name becomes a
/// directory below the moduledir.
pub fn parse_title(title: &str) -> Result<&str> {
    TITLE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str())
        .ok_or_else(|| Error::InvalidModuleName {
            title: title.to_string(),
        })
}
