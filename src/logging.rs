//! Diagnostic logging setup using `tracing-subscriber`.
//!
//! Rendered tracebacks and diagnostics share stderr, so the default level is
//! quiet and `RUST_LOG` opts into more.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter used by `--verbose` when `RUST_LOG` is unset.
pub const VERBOSE_LEVEL: &str = "debug";

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialise human-readable logging to stderr for the CLI.
///
/// Must be called at most once per process.
pub fn init_cli(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
