//! Logging initialization built on `tracing`.
//!
//! User-facing output (progress lines, the results dump) goes to stdout via
//! `println!`; diagnostics go to stderr through the subscriber installed
//! here. `RUST_LOG` wins over the verbosity flags when set.

use crate::error::{Result, SimscaleError};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Initialize logging for the binary.
///
/// Verbosity: `-v` enables debug, `-vv` trace; `--quiet` drops everything
/// below errors.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let default_directive = if quiet {
        "simscale=error"
    } else {
        match verbose {
            0 => "simscale=info",
            1 => "simscale=debug",
            _ => "simscale=trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SimscaleError::Config(format!("failed to install subscriber: {e}")))
}

static TEST_INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("simscale=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
