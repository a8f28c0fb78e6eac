#![cfg(feature = "std")]

//! Stderr logger for the binaries.
//!
//! `BROADSIDE_LOG` takes `EnvFilter` directives, either a bare level
//! (`debug`) or per-target levels (`warn,broadside::core=debug`). The
//! engine logs through the `log` facade, which the subscriber picks up
//! via its `tracing-log` bridge.

use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "BROADSIDE_LOG";

/// Install the stderr subscriber configured from `BROADSIDE_LOG` (default `info`).
/// Calling it again is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
