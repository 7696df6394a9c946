//! Process-wide logging setup

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` when
/// `verbose`. Returns `false` if a subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Verbose mode enabled");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_existing_subscriber() {
        init(false);
        assert!(!init(true));
    }
}
