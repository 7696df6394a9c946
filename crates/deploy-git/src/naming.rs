//! Branch name to directory name mapping

use std::sync::LazyLock;

use regex::Regex;

/// Runs of anything other than ASCII word characters.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("Invalid non-word regex"));

/// Convert a raw environment name into a safe directory name.
///
/// Every maximal run of characters outside `[A-Za-z0-9_]` becomes a single
/// underscore, so the result can never contain a path separator or `..`.
/// Puppet only accepts word characters in environment names anyway.
///
/// A warning is logged whenever the input had to be changed.
///
/// ```
/// use deploy_git::sanitize_dirname;
///
/// assert_eq!(sanitize_dirname("feature/foo-1"), "feature_foo_1");
/// assert_eq!(sanitize_dirname("production"), "production");
/// ```
pub fn sanitize_dirname(input: &str) -> String {
    let output = NON_WORD.replace_all(input, "_");

    if output != input {
        tracing::warn!(
            input = ?input,
            sanitized = ?output,
            "Environment name contained non-word characters; sanitizing"
        );
    }

    output.into_owned()
}

/// Directory name for an environment, optionally qualified by its source.
///
/// An empty `source_name` means the environment name is used on its own;
/// otherwise the two are joined as `{source_name}_{name}` before sanitizing.
pub fn environment_dirname(name: &str, source_name: &str) -> String {
    if source_name.is_empty() {
        sanitize_dirname(name)
    } else {
        sanitize_dirname(&format!("{source_name}_{name}"))
    }
}
