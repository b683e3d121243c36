//! Logging setup.
//!
//! Diagnostics go to stderr so stdout stays reserved for the summary.
//! `RUST_LOG` overrides the level derived from `-v`/`-q`. With a log file,
//! events are written there as JSON lines instead.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Level directive for a verbosity count.
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .json()
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .compact()
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}

/// Logging for tests: debug level, captured by the test harness.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("bench_compare=debug"))
        .with_test_writer()
        .try_init();
}
