//! Tracing setup shared by devstream binaries.
//!
//! The global subscriber can only be installed once per process; repeated
//! calls are silently ignored.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// * `json` — when `true`, emit newline-delimited JSON log lines for log
///   aggregation pipelines.
/// * `level` — default verbosity when `RUST_LOG` is not set; a set
///   `RUST_LOG` always wins.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}
