//! Tracing subscriber installation for the command-line entry point

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and verbose output is off
pub const DEFAULT_FILTER: &str = "warn";
/// Filter used when `RUST_LOG` is unset and verbose output is on
pub const VERBOSE_FILTER: &str = "debug";

/// Pick the directive applied when `RUST_LOG` is absent
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Install the global subscriber, writing to stderr
///
/// Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    });
}
