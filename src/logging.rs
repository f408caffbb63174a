//! Diagnostic logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so they never
//! interleave with SBOM tool output captured on stdout. User-facing progress
//! uses the `ProgressReporter` port instead.
//!
//! The level comes from the `-v` count unless `RUST_LOG` is set:
//!
//! | flags  | level   |
//! |--------|---------|
//! | (none) | `warn`  |
//! | `-v`   | `info`  |
//! | `-vv`  | `debug` |
//! | `-vvv` | `trace` |

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Maps the number of `-v` flags to a level
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Builds the filter: `RUST_LOG` when set and valid, otherwise the given level
pub fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()))
}

/// Initializes the tracing subscriber; later calls are ignored
pub fn init(verbose: u8) {
    INIT.call_once(|| {
        let filter = build_filter(level_for_verbosity(verbose));
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose >= 2)
            .without_time();

        // try_init fails only when another subscriber is already set (tests)
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(7), Level::TRACE);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(0);
        init(2);
    }
}
