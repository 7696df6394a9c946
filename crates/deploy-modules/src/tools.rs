//! External tool lookup and invocation

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::{Error, Result};

/// Locate an executable on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// The subset of `required` that cannot be found on `PATH`.
pub fn missing_tools(required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|tool| find_executable(tool).is_none())
        .map(|tool| (*tool).to_string())
        .collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Render a command for logs and error messages.
pub fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion, failing on a non-zero exit status.
pub fn run(command: &mut Command) -> Result<Output> {
    let description = describe(command);
    tracing::debug!(command = %description, "Running");

    let output = command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::CommandNotFound {
                command: description.clone(),
            }
        } else {
            Error::CommandFailed {
                command: description.clone(),
                message: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        return Err(Error::CommandFailed {
            command: description,
            message,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_reports_unknown() {
        let missing = missing_tools(&["deploy-surely-not-installed-tool"]);
        assert_eq!(missing, vec!["deploy-surely-not-installed-tool"]);
    }

    #[test]
    fn test_missing_tools_empty_requirements() {
        assert!(missing_tools(&[]).is_empty());
    }

    #[test]
    fn test_describe_joins_program_and_args() {
        let mut command = Command::new("librarian-puppet");
        command.args(["install", "--path", "modules"]);
        assert_eq!(describe(&command), "librarian-puppet install --path modules");
    }

    #[test]
    fn test_run_unknown_program_is_not_found() {
        let result = run(&mut Command::new("deploy-surely-not-installed-tool"));
        assert!(matches!(result, Err(Error::CommandNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_non_zero_exit() {
        let result = run(Command::new("sh").args(["-c", "echo boom >&2; exit 3"]));
        match result {
            Err(Error::CommandFailed { message, .. }) => assert_eq!(message, "boom"),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
