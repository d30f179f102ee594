//! JSON log output for the binary.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Used when `RUST_LOG` is unset or does not parse.
const DEFAULT_FILTER: &str = "info,actix_web=info";

/// Install the global subscriber: one JSON object per line on stdout, each
/// carrying the innermost span (normally `request`) under `span`.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init()
}
