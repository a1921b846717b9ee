//! Tracing setup for the `wattstep` binary.
//!
//! The interactive wizard owns the terminal, so its logs go to a file through
//! a non-blocking appender. The `timeline` subcommand logs to stderr, keeping
//! stdout for the timeline itself.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn,wattstep_core=info,wattstep_tui=info";

/// Filter used with `--debug`.
pub const DEBUG_FILTER: &str = "info,wattstep_core=trace,wattstep_tui=trace";

/// Guard that ensures the log file is flushed when dropped.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Routes all logs to `path`, truncating it.
pub fn init_file_logging(path: &Path, debug: bool) -> Result<LogGuard> {
    let file = File::create(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create log file {}: {}. Check write permissions.",
            path.display(),
            e
        )
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(file_layer)
        .init();

    Ok(LogGuard { _guard: guard })
}

/// Routes logs to stderr.
pub fn init_stderr_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .init();
}
