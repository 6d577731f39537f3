//! Logger setup. All log output goes to stderr so stdout only carries PEM
//! or report data.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;

pub(crate) const LOG_ENV: &str = "PEMKIT_LOG";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the global subscriber.
///
/// `directives` uses `EnvFilter` syntax, e.g. `debug` or
/// `pemkit_codec=debug,warn`.
pub(crate) fn init_logging(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()?;
    Ok(())
}
