//! Tracing subscriber setup for the command-line binary
//!
//! The library only emits `tracing` events; without a subscriber they are
//! discarded.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,auth0_import=debug"
    } else {
        "warn,auth0_import=info"
    }
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `verbose`
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
