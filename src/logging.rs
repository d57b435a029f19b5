use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "RECIPEBOOK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing on stderr.
///
/// The filter comes from `RECIPEBOOK_LOG` (e.g. `recipebook=debug`) and
/// defaults to `warn` so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true);

    // Ignore a second initialization (tests may call this repeatedly).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
