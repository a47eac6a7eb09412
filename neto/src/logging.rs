//! Tracing setup. Logs go to stderr so they never mix with rendered pages.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "NETO_LOG";

/// Install the global subscriber.
///
/// `NETO_LOG` wins over `level`. Calling twice is a no-op.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
